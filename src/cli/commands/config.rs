//! Config command implementation.
//!
//! The `scriptorium config` command prints and changes configuration
//! values. Only a change writes the configuration file.

use std::collections::BTreeMap;

use crate::cli::args::ConfigArgs;
use crate::config::{ConfigKey, ConfigPaths, Settings};
use crate::error::{Result, ScriptoriumError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    paths: ConfigPaths,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(paths: &ConfigPaths, args: ConfigArgs) -> Self {
        Self {
            paths: paths.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut settings = Settings::load(&self.paths)?;

        if self.args.json {
            let entries: BTreeMap<&str, String> = settings
                .entries()
                .into_iter()
                .map(|(key, value)| (key.name(), value))
                .collect();
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| ScriptoriumError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if self.args.list {
            for (key, value) in settings.entries() {
                ui.output(&format!("{} = {}", key, value));
            }
            return Ok(CommandResult::success());
        }

        match self.args.value.as_slice() {
            [] => {
                ui.message(&format!("# {}", self.paths.config_file.display()));
                for (key, value) in settings.entries() {
                    ui.output(&format!("{} = {}", key, value));
                }
            }
            [key] => {
                let key: ConfigKey = key.parse()?;
                ui.output(&settings.get(key));
            }
            [key, value, ..] => {
                let key: ConfigKey = key.parse()?;
                settings.set(key, value)?;
                settings.save(&self.paths)?;
                tracing::debug!(%key, "Configuration updated");
                ui.success(&format!("{} = {}", key, settings.get(key)));
            }
        }

        Ok(CommandResult::success())
    }
}
