//! Scriptorium - Build academic papers from MultiMarkdown and LaTeX templates.
//!
//! A paper is a directory of `.mmd` sources. One of them, the root document,
//! names a template in its `latexfooter` metadata. Scriptorium converts the
//! sources to LaTeX, typesets the root with the template on the search path,
//! and runs bibtex or biber when the paper asks for a bibliography.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading and persistence
//! - [`error`] - Error types and result aliases
//! - [`paper`] - Root document resolution and the build pipeline
//! - [`registry`] - Installed templates and git installation
//! - [`requirements`] - External program checks for `doctor`
//! - [`scaffold`] - Placeholder substitution and new-paper creation
//! - [`shell`] - External process execution
//! - [`toolchain`] - Converter, typesetter and bibliography seams
//! - [`ui`] - Spinners, themes and terminal output
//!
//! # Example
//!
//! ```
//! use scriptorium::scaffold::Substitution;
//! use std::collections::BTreeMap;
//!
//! let mut config = BTreeMap::new();
//! config.insert("TITLE".to_string(), "On Proofs".to_string());
//!
//! let subst = Substitution::new(&config)?;
//! assert_eq!(subst.apply("Title: $TITLE, $x$"), "Title: On Proofs, $x$");
//! # Ok::<(), scriptorium::ScriptoriumError>(())
//! ```
//!
//! For building papers against fake tools, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod paper;
pub mod registry;
pub mod requirements;
pub mod scaffold;
pub mod shell;
pub mod toolchain;
pub mod ui;

pub use error::{Result, ScriptoriumError};
