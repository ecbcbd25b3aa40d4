//! Required external packages and the binaries that provide them.

use crate::config::Settings;
use crate::requirements::probe::{parse_system_path, resolve_tool_path};
use std::path::PathBuf;

/// An external package and the binaries it must provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package name as reported to the user.
    pub name: &'static str,
    /// Binaries expected on `PATH`.
    pub binaries: Vec<String>,
}

/// A package with at least one binary missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPackage {
    /// Package name.
    pub name: &'static str,
    /// Binaries that could not be found.
    pub binaries: Vec<String>,
}

/// Packages Scriptorium drives. The LaTeX package checks the configured
/// typesetting command.
pub fn required_packages(settings: &Settings) -> Vec<Package> {
    vec![
        Package {
            name: "git",
            binaries: vec!["git".to_string()],
        },
        Package {
            name: "latex",
            binaries: vec![
                settings.latex_cmd.clone(),
                "bibtex".to_string(),
                "biber".to_string(),
            ],
        },
        Package {
            name: "multimarkdown",
            binaries: vec!["multimarkdown".to_string()],
        },
    ]
}

/// Checks binaries against a set of search directories.
#[derive(Debug, Clone)]
pub struct RequirementChecker {
    path_entries: Vec<PathBuf>,
}

impl RequirementChecker {
    /// Create a checker over explicit directories.
    pub fn new(path_entries: Vec<PathBuf>) -> Self {
        Self { path_entries }
    }

    /// Create a checker over the process `PATH`.
    pub fn from_env() -> Self {
        Self::new(parse_system_path())
    }

    /// Full path of `binary`, if it is installed.
    pub fn locate(&self, binary: &str) -> Option<PathBuf> {
        resolve_tool_path(binary, &self.path_entries)
    }

    /// Whether `binary` is installed.
    pub fn is_installed(&self, binary: &str) -> bool {
        self.locate(binary).is_some()
    }

    /// Every package with missing binaries, in input order.
    pub fn missing(&self, packages: &[Package]) -> Vec<MissingPackage> {
        packages
            .iter()
            .filter_map(|package| {
                let binaries: Vec<String> = package
                    .binaries
                    .iter()
                    .filter(|b| !self.is_installed(b))
                    .cloned()
                    .collect();
                if binaries.is_empty() {
                    None
                } else {
                    tracing::debug!(package = package.name, ?binaries, "Missing binaries");
                    Some(MissingPackage {
                        name: package.name,
                        binaries,
                    })
                }
            })
            .collect()
    }
}
