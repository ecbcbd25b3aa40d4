//! Directory-rooted template lookup.
//!
//! Any directory below the registry root that contains `setup.tex` is a
//! template, named after the directory. Templates may be nested inside
//! repositories (`templates/ieee/ieeetran/setup.tex`); `.git` directories
//! are never entered.

use crate::error::{Result, ScriptoriumError};
use crate::registry::template::{Template, SETUP_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// The set of templates installed under one directory.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    root: PathBuf,
}

impl TemplateRegistry {
    /// Create a registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the template called `name`.
    pub fn find(&self, name: &str) -> Result<Template> {
        self.try_find(name)?
            .ok_or_else(|| ScriptoriumError::TemplateNotInstalled {
                name: name.to_string(),
            })
    }

    /// Find the template called `name`, returning `None` when absent.
    pub fn try_find(&self, name: &str) -> Result<Option<Template>> {
        let found = self
            .template_dirs()?
            .into_iter()
            .find(|dir| dir_name(dir).as_deref() == Some(name));

        tracing::debug!(name, found = ?found, "Template lookup");

        Ok(found.map(|path| Template::new(name, path)))
    }

    /// Names of all installed templates, sorted and deduplicated.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .template_dirs()?
            .iter()
            .filter_map(|dir| dir_name(dir))
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Every template directory, in sorted walk order.
    fn template_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if self.root.is_dir() {
            Self::walk(&self.root, &mut found)?;
        }
        Ok(found)
    }

    fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
        if dir.join(SETUP_FILE).is_file() {
            found.push(dir.to_path_buf());
        }

        let mut children: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .filter(|path| dir_name(path).as_deref() != Some(".git"))
            .collect();
        children.sort();

        for child in children {
            Self::walk(&child, found)?;
        }
        Ok(())
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
