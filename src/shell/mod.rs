//! External program execution and platform details.

pub mod command;
pub mod platform;

pub use command::{run, run_checked, CommandOptions, CommandResult};
pub use platform::{binary_name, is_ci, search_path_separator};
