//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`scriptorium build`, `scriptorium new`)
//! - Shared configuration loading
//! - Consistent error reporting through [`report_error`]

pub mod build;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod doctor;
pub mod info;
pub mod new;
pub mod template;

pub use dispatcher::{report_error, Command, CommandDispatcher, CommandResult};
