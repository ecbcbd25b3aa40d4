//! An installed paper template.

use crate::error::Result;
use crate::registry::manifest::{load_defaults, Manifest};
use crate::scaffold::substitution::placeholder_names;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File whose presence marks a directory as a template.
pub const SETUP_FILE: &str = "setup.tex";

/// Optional documentation shipped with a template.
pub const README_FILE: &str = "README.md";

/// A named template directory inside the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template name (the directory's base name).
    pub name: String,

    /// Absolute path to the template directory.
    pub path: PathBuf,
}

impl Template {
    /// Create a template handle for `path`, named after its base name.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The directory that contains the template directory.
    ///
    /// Added to the typesetting search path so `<name>/footer.tex`
    /// references resolve.
    pub fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// The template's manifest.
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.path)
    }

    /// The template's default placeholder values.
    pub fn defaults(&self) -> Result<BTreeMap<String, String>> {
        load_defaults(&self.path)
    }

    /// Contents of the template's README, if it has one.
    pub fn readme(&self) -> Result<Option<String>> {
        let path = self.path.join(README_FILE);
        if path.is_file() {
            Ok(Some(fs::read_to_string(path)?))
        } else {
            Ok(None)
        }
    }

    /// Read a manifest source file. A missing file reads as empty.
    pub fn read_source(&self, source: &str) -> Result<String> {
        let path = self.path.join(source);
        if path.is_file() {
            Ok(fs::read_to_string(path)?)
        } else {
            tracing::debug!(template = %self.name, source, "Manifest source missing, using empty text");
            Ok(String::new())
        }
    }

    /// Placeholders a new paper from this template accepts.
    ///
    /// Names used in the manifest sources plus names with defaults, each
    /// paired with its default value if there is one.
    pub fn variables(&self) -> Result<BTreeMap<String, Option<String>>> {
        let defaults = self.defaults()?;
        let mut variables: BTreeMap<String, Option<String>> = BTreeMap::new();

        for (_, source) in self.manifest()?.iter() {
            for name in placeholder_names(&self.read_source(source)?) {
                let name = name.to_uppercase();
                let default = defaults.get(&name).cloned();
                variables.entry(name).or_insert(default);
            }
        }

        for (name, value) in defaults {
            variables.entry(name).or_insert(Some(value));
        }

        // Bound at scaffold time, never supplied by the user.
        variables.remove("TEMPLATE");

        Ok(variables)
    }
}
