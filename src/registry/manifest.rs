//! Template manifest and default-value files.
//!
//! `manifest.yml` maps destination file names in a new paper to source
//! files inside the template. `defaults.yml` maps placeholder names to
//! default values.

use crate::error::{Result, ScriptoriumError};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Manifest file name inside a template.
pub const MANIFEST_FILE: &str = "manifest.yml";

/// Defaults file name inside a template.
pub const DEFAULTS_FILE: &str = "defaults.yml";

/// Destination file name → template source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Default for Manifest {
    /// The manifest used when a template does not ship one.
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("paper.mmd".to_string(), "frontmatter.mmd".to_string());
        entries.insert("metadata.tex".to_string(), "metadata.tex".to_string());
        Self { entries }
    }
}

impl Manifest {
    /// Build a manifest from explicit entries.
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load `manifest.yml` from `template_dir`, or the default manifest.
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let entries: BTreeMap<String, String> =
            serde_yaml::from_str(&content).map_err(|e| ScriptoriumError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    /// Iterate `(destination, source)` pairs in destination order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(dest, src)| (dest.as_str(), src.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest lists no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load `defaults.yml` from `template_dir`. Absent file means no defaults.
///
/// Keys are upper-cased. Scalar values of any type are stringified; a
/// null value becomes the empty string.
pub fn load_defaults(template_dir: &Path) -> Result<BTreeMap<String, String>> {
    let path = template_dir.join(DEFAULTS_FILE);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let parse_error = |message: String| ScriptoriumError::ConfigParseError {
        path: path.clone(),
        message,
    };

    let raw: BTreeMap<String, Value> =
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

    raw.into_iter()
        .map(|(key, value)| {
            let value = scalar_to_string(&value).ok_or_else(|| {
                parse_error(format!("default for '{}' must be a scalar value", key))
            })?;
            Ok((key.to_uppercase(), value))
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
