//! Configuration file discovery, loading, and persistence.
//!
//! The configuration lives in a single YAML file, `~/.scriptorium/config`
//! by default. A missing file means "all defaults"; it is only written when
//! the user changes a value with `scriptorium config KEY VALUE`.

use crate::config::settings::{Settings, SettingsFile};
use crate::error::{Result, ScriptoriumError};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "SCRIPTORIUM_CONFIG";

/// Locations of the configuration file and the default template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// The YAML configuration file.
    pub config_file: PathBuf,

    /// Template directory used when the file does not name one.
    pub default_template_dir: PathBuf,
}

impl ConfigPaths {
    /// Standard locations under `~/.scriptorium`.
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine the home directory"))?;
        Ok(Self::with_root(&home.join(".scriptorium")))
    }

    /// Locations rooted at `root` (`root/config`, `root/templates`).
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_file: root.join("config"),
            default_template_dir: root.join("templates"),
        }
    }

    /// Locations for an explicitly named configuration file. Templates
    /// default to a `templates` directory next to it.
    pub fn from_config_file(path: &Path) -> Self {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self {
            config_file: path.to_path_buf(),
            default_template_dir: parent.join("templates"),
        }
    }

    /// Resolve paths from an optional override, falling back to the
    /// standard locations.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self> {
        match config_override {
            Some(path) => Ok(Self::from_config_file(path)),
            None => Self::discover(),
        }
    }
}

impl Settings {
    /// Load settings, creating the template directory if needed.
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let file = if paths.config_file.exists() {
            tracing::debug!(path = %paths.config_file.display(), "Loading configuration");
            parse_settings_file(&paths.config_file)?
        } else {
            tracing::debug!(
                path = %paths.config_file.display(),
                "No configuration file, using defaults"
            );
            SettingsFile::default()
        };

        let settings = file.into_settings(&paths.default_template_dir);
        fs::create_dir_all(&settings.template_dir)?;
        Ok(settings)
    }

    /// Persist settings to the configuration file.
    ///
    /// Writes to a temporary file and renames it into place.
    pub fn save(&self, paths: &ConfigPaths) -> Result<()> {
        if let Some(dir) = paths.config_file.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_yaml::to_string(&SettingsFile::from(self)).map_err(|e| {
            ScriptoriumError::ConfigParseError {
                path: paths.config_file.clone(),
                message: format!("Failed to serialize configuration: {}", e),
            }
        })?;

        let temp_path = paths.config_file.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &paths.config_file)?;

        tracing::debug!(path = %paths.config_file.display(), "Saved configuration");
        Ok(())
    }
}

fn parse_settings_file(path: &Path) -> Result<SettingsFile> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(SettingsFile::default());
    }
    serde_yaml::from_str(&content).map_err(|e| ScriptoriumError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
