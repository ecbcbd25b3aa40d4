//! Build command implementation.
//!
//! The `scriptorium build` command turns a paper directory into a PDF.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::BuildArgs;
use crate::config::{ConfigPaths, Settings};
use crate::error::{Result, ScriptoriumError};
use crate::paper::{BuildOptions, BuildOutcome, Pipeline};
use crate::registry::TemplateRegistry;
use crate::toolchain::Toolchain;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build command implementation.
pub struct BuildCommand {
    paths: ConfigPaths,
    args: BuildArgs,
}

impl BuildCommand {
    /// Create a new build command.
    pub fn new(paths: &ConfigPaths, args: BuildArgs) -> Self {
        Self {
            paths: paths.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &BuildArgs {
        &self.args
    }

    /// Build with an explicit toolchain and registry.
    pub fn run(
        &self,
        toolchain: &Toolchain,
        registry: &TemplateRegistry,
        ui: &mut dyn UserInterface,
    ) -> Result<BuildOutcome> {
        let pipeline = Pipeline::new(toolchain, registry);

        // An output that is the artifact itself needs neither a check nor a move.
        let destination = match self.args.output.as_deref() {
            Some(dest) => {
                let dest = absolute_path(dest)?;
                let paper = pipeline.locate(&self.args.paper)?;
                let artifact = paper.dir.join(format!("{}.pdf", paper.base_name()));
                if dest == artifact {
                    None
                } else {
                    Some(dest)
                }
            }
            None => None,
        };
        if let Some(dest) = &destination {
            if dest.exists() && !self.args.force {
                return Err(ScriptoriumError::DestinationExists { path: dest.clone() });
            }
        }

        let options = BuildOptions {
            shell_escape: self.args.shell_escape,
        };

        let mut spinner = ui.start_spinner("Building paper");
        let result = pipeline.build_with(&self.args.paper, options, |stage| {
            tracing::debug!(%stage, "Build stage");
            spinner.set_message(&stage.to_string());
        });

        let mut outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                spinner.finish_error("Build failed");
                return Err(e);
            }
        };

        if let Some(dest) = destination {
            move_file(&outcome.artifact, &dest)?;
            outcome.artifact = dest;
        }

        spinner.finish_success(&format!("Built {}", outcome.artifact.display()));
        Ok(outcome)
    }
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.paths)?;
        let toolchain = Toolchain::system(&settings);
        let registry = TemplateRegistry::new(&settings.template_dir);

        let outcome = self.run(&toolchain, &registry, ui)?;

        if ui.output_mode().shows_details() {
            ui.message(&format!("Root document: {}", outcome.root.display()));
            ui.message(&format!("Template: {}", outcome.template));
            if let Some(engine) = outcome.bibliography {
                ui.message(&format!("Bibliography: {}", engine));
            }
            ui.message(&format!("Typesetting passes: {}", outcome.passes));
        }

        Ok(CommandResult::success())
    }
}

/// `path` made absolute, with its parent directory canonicalised when it exists.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let canonical = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|p| p.join(name)),
        _ => None,
    };
    Ok(canonical.unwrap_or(absolute))
}

/// Move `from` to `to`, copying when a rename is not possible.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}
