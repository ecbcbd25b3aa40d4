//! New command implementation.
//!
//! The `scriptorium new` command scaffolds a paper from an installed
//! template.

use std::collections::BTreeMap;

use crate::cli::args::NewArgs;
use crate::config::{ConfigPaths, Settings};
use crate::error::{Result, EXIT_UNSET_VARIABLES};
use crate::registry::TemplateRegistry;
use crate::scaffold::{create, ScaffoldOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The new command implementation.
pub struct NewCommand {
    paths: ConfigPaths,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new `new` command.
    pub fn new(paths: &ConfigPaths, args: NewArgs) -> Self {
        Self {
            paths: paths.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &NewArgs {
        &self.args
    }

    fn options(&self) -> ScaffoldOptions {
        let config: BTreeMap<String, String> = self
            .args
            .pairs()
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();
        ScaffoldOptions {
            force: self.args.force,
            config,
            gitignore: true,
        }
    }

    /// Scaffold against an explicit registry.
    pub fn run(
        &self,
        registry: &TemplateRegistry,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let unset = create(
            registry,
            &self.args.output,
            &self.args.template,
            &self.options(),
        )?;

        if unset.is_empty() {
            ui.success(&format!(
                "Created {} from {}",
                self.args.output.display(),
                self.args.template
            ));
            return Ok(CommandResult::success());
        }

        ui.warning(&format!(
            "Created {} with unset variables:",
            self.args.output.display()
        ));
        for name in &unset {
            ui.output(name);
        }
        ui.show_hint(&format!(
            "Set them with -c KEY VALUE, or see `scriptorium template -v {}`",
            self.args.template
        ));
        Ok(CommandResult::failure(EXIT_UNSET_VARIABLES))
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.paths)?;
        let registry = TemplateRegistry::new(&settings.template_dir);
        self.run(&registry, ui)
    }
}
