//! External tool requirements, checked by `scriptorium doctor`.

pub mod checker;
pub mod probe;

pub use checker::{required_packages, MissingPackage, Package, RequirementChecker};
pub use probe::{is_executable, parse_system_path, resolve_tool_path};
