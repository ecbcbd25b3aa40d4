//! Typed settings and the enumerated set of configuration keys.

use crate::error::{Result, ScriptoriumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default typesetting command.
pub const DEFAULT_LATEX_CMD: &str = "pdflatex";

/// Default deadline for each external tool, in seconds.
pub const DEFAULT_TOOL_TIMEOUT: u64 = 300;

/// A recognised configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Root of the template registry.
    TemplateDir,
    /// Typesetting command name.
    LatexCmd,
    /// Per-tool deadline in seconds.
    ToolTimeout,
}

impl ConfigKey {
    /// All keys, in display order.
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::TemplateDir,
        ConfigKey::LatexCmd,
        ConfigKey::ToolTimeout,
    ];

    /// Name as stored in the configuration file.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::TemplateDir => "TEMPLATE_DIR",
            ConfigKey::LatexCmd => "LATEX_CMD",
            ConfigKey::ToolTimeout => "TOOL_TIMEOUT",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ScriptoriumError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| ScriptoriumError::UnknownConfigKey { key: s.to_string() })
    }
}

/// Process-wide settings, passed explicitly to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the template registry.
    pub template_dir: PathBuf,

    /// Typesetting command.
    pub latex_cmd: String,

    /// Deadline for each external tool, in seconds.
    pub tool_timeout: u64,
}

impl Settings {
    /// Default settings using the given template directory.
    pub fn with_template_dir(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            latex_cmd: DEFAULT_LATEX_CMD.to_string(),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Deadline applied to external tools.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout)
    }

    /// Current value of `key`, rendered as a string.
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::TemplateDir => self.template_dir.display().to_string(),
            ConfigKey::LatexCmd => self.latex_cmd.clone(),
            ConfigKey::ToolTimeout => self.tool_timeout.to_string(),
        }
    }

    /// Validate and assign `value` to `key`.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ScriptoriumError::InvalidConfigValue {
                key: key.name().to_string(),
                message: "value must not be empty".into(),
            });
        }

        match key {
            ConfigKey::TemplateDir => self.template_dir = expand_tilde(value),
            ConfigKey::LatexCmd => self.latex_cmd = value.to_string(),
            ConfigKey::ToolTimeout => {
                let secs: u64 =
                    value
                        .parse()
                        .map_err(|_| ScriptoriumError::InvalidConfigValue {
                            key: key.name().to_string(),
                            message: format!("'{}' is not a whole number of seconds", value),
                        })?;
                if secs == 0 {
                    return Err(ScriptoriumError::InvalidConfigValue {
                        key: key.name().to_string(),
                        message: "timeout must be at least one second".into(),
                    });
                }
                self.tool_timeout = secs;
            }
        }
        Ok(())
    }

    /// All keys with their current values.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL.into_iter().map(|k| (k, self.get(k))).collect()
    }
}

/// On-disk shape of the configuration file. Missing keys take defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SettingsFile {
    #[serde(rename = "TEMPLATE_DIR", default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,

    #[serde(rename = "LATEX_CMD", default, skip_serializing_if = "Option::is_none")]
    pub latex_cmd: Option<String>,

    #[serde(rename = "TOOL_TIMEOUT", default, skip_serializing_if = "Option::is_none")]
    pub tool_timeout: Option<u64>,
}

impl SettingsFile {
    pub(crate) fn into_settings(self, default_template_dir: &Path) -> Settings {
        Settings {
            template_dir: self
                .template_dir
                .as_deref()
                .map(expand_tilde)
                .unwrap_or_else(|| default_template_dir.to_path_buf()),
            latex_cmd: self
                .latex_cmd
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LATEX_CMD.to_string()),
            tool_timeout: self
                .tool_timeout
                .filter(|t| *t > 0)
                .unwrap_or(DEFAULT_TOOL_TIMEOUT),
        }
    }
}

impl From<&Settings> for SettingsFile {
    fn from(settings: &Settings) -> Self {
        Self {
            template_dir: Some(settings.template_dir.display().to_string()),
            latex_cmd: Some(settings.latex_cmd.clone()),
            tool_timeout: Some(settings.tool_timeout),
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
