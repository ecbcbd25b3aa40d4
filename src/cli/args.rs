//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::CONFIG_ENV;

/// Scriptorium - Build academic papers from MultiMarkdown and LaTeX templates.
#[derive(Debug, Parser)]
#[command(name = "scriptorium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.scriptorium/config)
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the PDF for a paper
    Build(BuildArgs),

    /// Show the root document or template of a paper
    Info(InfoArgs),

    /// Create a new paper from a template
    New(NewArgs),

    /// List, inspect, install and update templates
    Template(TemplateArgs),

    /// Check that the required external programs are installed
    Doctor,

    /// Show or change configuration values
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Directory containing the paper, or its root document
    #[arg(default_value = ".")]
    pub paper: PathBuf,

    /// Move the resulting PDF here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Allow LaTeX to run external commands
    #[arg(short, long)]
    pub shell_escape: bool,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            paper: PathBuf::from("."),
            output: None,
            shell_escape: false,
            force: false,
        }
    }
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InfoArgs {
    /// Directory containing the paper
    #[arg(default_value = ".")]
    pub paper: PathBuf,

    /// Print the template name instead of the root document
    #[arg(short, long)]
    pub template: bool,
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// Directory to create the paper in
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long)]
    pub template: String,

    /// Write into an existing directory
    #[arg(short, long)]
    pub force: bool,

    /// Placeholder value, as KEY VALUE (repeatable)
    #[arg(
        short = 'c',
        long = "var",
        num_args = 2,
        value_names = ["KEY", "VALUE"],
        action = clap::ArgAction::Append
    )]
    pub vars: Vec<String>,
}

impl NewArgs {
    /// The `-c KEY VALUE` pairs, in order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.vars
            .chunks(2)
            .filter_map(|pair| match pair {
                [key, value] => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }
}

/// Arguments for the `template` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplateArgs {
    /// List installed templates
    #[arg(short, long)]
    pub list: bool,

    /// Update a template, optionally to a revision
    #[arg(short, long, value_name = "NAME[,REV]")]
    pub update: Option<String>,

    /// Print the README of a template
    #[arg(short, long, value_name = "NAME")]
    pub readme: Option<String>,

    /// Install the repository at URL into the template directory
    #[arg(short, long, value_name = "URL")]
    pub install: Option<String>,

    /// List placeholders accepted by `new` for a template
    #[arg(short, long, value_name = "NAME")]
    pub variables: Option<String>,

    /// Show the files a template writes for a new paper
    #[arg(short, long, value_name = "NAME")]
    pub manifest: Option<String>,

    /// Override the template directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl TemplateArgs {
    /// The `-u NAME[,REV]` target split into name and revision.
    pub fn update_target(&self) -> Option<(&str, Option<&str>)> {
        let target = self.update.as_deref()?;
        Some(match target.split_once(',') {
            Some((name, rev)) if !rev.is_empty() => (name, Some(rev)),
            Some((name, _)) => (name, None),
            None => (target, None),
        })
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// List all configuration keys and values
    #[arg(short, long)]
    pub list: bool,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,

    /// KEY to print, or KEY VALUE to set
    #[arg(num_args = 0..=2, value_names = ["KEY", "VALUE"])]
    pub value: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
