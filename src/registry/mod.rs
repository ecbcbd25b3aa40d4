//! Template registry for Scriptorium.
//!
//! Templates live in a single directory (the configured `TEMPLATE_DIR`),
//! usually as git checkouts. This module handles:
//! - Locating templates by name in [`local`]
//! - The template handle and its files in [`template`]
//! - Manifest and defaults parsing in [`manifest`]
//! - Installing and updating repositories in [`fetch`]
//!
//! # Example
//!
//! ```
//! use scriptorium::registry::TemplateRegistry;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join("article");
//! std::fs::create_dir_all(&dir).unwrap();
//! std::fs::write(dir.join("setup.tex"), "").unwrap();
//!
//! let registry = TemplateRegistry::new(temp.path());
//! assert_eq!(registry.find("article").unwrap().path, dir);
//! ```

pub mod fetch;
pub mod local;
pub mod manifest;
pub mod template;

pub use fetch::GitFetcher;
pub use local::TemplateRegistry;
pub use manifest::Manifest;
pub use template::Template;
