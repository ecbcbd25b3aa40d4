//! Configuration loading and persistence for Scriptorium.
//!
//! - Typed settings and keys in [`settings`]
//! - File discovery, loading and saving in [`loader`]
//!
//! # Example
//!
//! ```
//! use scriptorium::config::{ConfigKey, ConfigPaths, Settings};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let paths = ConfigPaths::with_root(temp.path());
//!
//! let mut settings = Settings::load(&paths).unwrap();
//! settings.set(ConfigKey::LatexCmd, "xelatex").unwrap();
//! settings.save(&paths).unwrap();
//!
//! assert_eq!(Settings::load(&paths).unwrap().latex_cmd, "xelatex");
//! ```

pub mod loader;
pub mod settings;

pub use loader::{ConfigPaths, CONFIG_ENV};
pub use settings::{expand_tilde, ConfigKey, Settings, DEFAULT_LATEX_CMD, DEFAULT_TOOL_TIMEOUT};
