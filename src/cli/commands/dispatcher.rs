//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::ConfigPaths;
use crate::error::{Result, ScriptoriumError};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: ConfigPaths,
}

impl CommandDispatcher {
    /// Create a new dispatcher using the given configuration locations.
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Get the configuration locations.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Build(args) => {
                let cmd = super::build::BuildCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Commands::Info(args) => {
                let cmd = super::info::InfoCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Commands::New(args) => {
                let cmd = super::new::NewCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Commands::Template(args) => {
                let cmd = super::template::TemplateCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Commands::Doctor => {
                let cmd = super::doctor::DoctorCommand::new(&self.paths);
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let cmd = super::config::ConfigCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

/// Print a failed command's error and return the exit code it maps to.
///
/// Tool failures also show the captured tool output.
pub fn report_error(ui: &mut dyn UserInterface, err: &ScriptoriumError) -> i32 {
    if let ScriptoriumError::ToolInvocationFailed { tool, .. }
    | ScriptoriumError::ToolTimedOut { tool, .. } = err
    {
        if let Some(diagnostic) = err.diagnostic() {
            let hint = format!("Run `{}` by hand in the paper directory for details", tool);
            ui.show_error_block(tool, diagnostic, Some(&hint));
        }
    }
    ui.error(&err.to_string());
    err.exit_code()
}
