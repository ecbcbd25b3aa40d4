//! Template command implementation.
//!
//! The `scriptorium template` command lists, inspects, installs and updates
//! templates. Actions run in a fixed order: update, list, readme, install,
//! variables, manifest.

use std::path::PathBuf;

use crate::cli::args::TemplateArgs;
use crate::config::{expand_tilde, ConfigPaths, Settings};
use crate::error::Result;
use crate::registry::{GitFetcher, TemplateRegistry};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The template command implementation.
pub struct TemplateCommand {
    paths: ConfigPaths,
    args: TemplateArgs,
}

impl TemplateCommand {
    /// Create a new template command.
    pub fn new(paths: &ConfigPaths, args: TemplateArgs) -> Self {
        Self {
            paths: paths.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &TemplateArgs {
        &self.args
    }

    fn template_dir(&self) -> Result<PathBuf> {
        match &self.args.template_dir {
            Some(dir) => Ok(expand_tilde(&dir.to_string_lossy())),
            None => Ok(Settings::load(&self.paths)?.template_dir),
        }
    }

    fn has_action(&self) -> bool {
        self.args.list
            || self.args.update.is_some()
            || self.args.readme.is_some()
            || self.args.install.is_some()
            || self.args.variables.is_some()
            || self.args.manifest.is_some()
    }

    /// Run every requested action against `template_dir`.
    pub fn run(&self, template_dir: PathBuf, ui: &mut dyn UserInterface) -> Result<()> {
        let registry = TemplateRegistry::new(&template_dir);
        let fetcher = GitFetcher::new(&template_dir);

        if let Some((name, rev)) = self.args.update_target() {
            let mut spinner = ui.start_spinner(&format!("Updating {}", name));
            match fetcher.update(name, rev) {
                Ok(dir) => spinner.finish_success(&format!("Updated {}", dir.display())),
                Err(e) => {
                    spinner.finish_error(&format!("Could not update {}", name));
                    return Err(e);
                }
            }
        }

        if self.args.list {
            for name in registry.names()? {
                ui.output(&name);
            }
        }

        if let Some(name) = &self.args.readme {
            match registry.find(name)?.readme()? {
                Some(text) => ui.output(text.trim_end()),
                None => ui.warning(&format!("Template '{}' has no README", name)),
            }
        }

        if let Some(url) = &self.args.install {
            let mut spinner = ui.start_spinner(&format!("Installing {}", url));
            match fetcher.install(url, None) {
                Ok(dir) => spinner.finish_success(&format!("Installed {}", dir.display())),
                Err(e) => {
                    spinner.finish_error(&format!("Could not install {}", url));
                    return Err(e);
                }
            }
        }

        if let Some(name) = &self.args.variables {
            for (variable, default) in registry.find(name)?.variables()? {
                let variable = variable.to_lowercase();
                match default {
                    Some(value) => ui.output(&format!("{} (default: {})", variable, value)),
                    None => ui.output(&variable),
                }
            }
        }

        if let Some(name) = &self.args.manifest {
            for (destination, source) in registry.find(name)?.manifest()?.iter() {
                ui.output(&format!("{} <- {}", destination, source));
            }
        }

        Ok(())
    }
}

impl Command for TemplateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.has_action() {
            ui.warning("No template action given");
            ui.show_hint("Use `scriptorium template -l` to list installed templates");
            return Ok(CommandResult::failure(10));
        }

        let dir = self.template_dir()?;
        self.run(dir, ui)?;
        Ok(CommandResult::success())
    }
}
