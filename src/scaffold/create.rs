//! Creating a new paper from a template.

use crate::error::{Result, ScriptoriumError};
use crate::registry::TemplateRegistry;
use crate::scaffold::substitution::{expand, unresolved};
use include_dir::{include_dir, Dir};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Files shipped inside the binary.
static DATA_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// Placeholder bound to the template's own name.
pub const TEMPLATE_KEY: &str = "TEMPLATE";

/// Options for [`create`].
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Write into an existing destination directory.
    pub force: bool,
    /// Placeholder values, overriding the template defaults.
    pub config: BTreeMap<String, String>,
    /// Add a `.gitignore` for LaTeX build products if none exists.
    pub gitignore: bool,
}

/// The embedded `.gitignore` for new papers.
pub fn gitignore_contents() -> Option<&'static str> {
    DATA_DIR
        .get_file("gitignore")
        .and_then(|file| file.contents_utf8())
}

/// Write a new paper from `template_name` into `dest`.
///
/// Returns the placeholder names (lower-cased) still present in the
/// written files. An empty set means every placeholder was filled.
pub fn create(
    registry: &TemplateRegistry,
    dest: &Path,
    template_name: &str,
    options: &ScaffoldOptions,
) -> Result<BTreeSet<String>> {
    let template = registry.find(template_name)?;

    if dest.exists() && !options.force {
        return Err(ScriptoriumError::DestinationExists {
            path: dest.to_path_buf(),
        });
    }
    fs::create_dir_all(dest)?;

    if options.gitignore {
        write_gitignore(dest);
    }

    let manifest = template.manifest()?;
    let mut texts = BTreeMap::new();
    for (destination, source) in manifest.iter() {
        texts.insert(destination.to_string(), template.read_source(source)?);
    }

    let mut config = template.defaults()?;
    for (key, value) in &options.config {
        config.insert(key.to_uppercase(), value.clone());
    }
    config.insert(TEMPLATE_KEY.to_string(), template.name.clone());

    let expanded = expand(&texts, &config)?;
    for (destination, text) in &expanded {
        let path = dest.join(destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, text)?;
        tracing::debug!(path = %path.display(), "Wrote scaffold file");
    }

    Ok(unresolved(expanded.values().map(String::as_str)))
}

fn write_gitignore(dest: &Path) {
    let path = dest.join(".gitignore");
    if path.exists() {
        return;
    }
    let Some(contents) = gitignore_contents() else {
        tracing::warn!("No embedded .gitignore available");
        return;
    };
    if let Err(e) = fs::write(&path, contents) {
        tracing::warn!(path = %path.display(), error = %e, "Could not write .gitignore");
    }
}
