//! Placeholder substitution for template text.
//!
//! A placeholder is `$` followed by one or more of `[A-Z0-9_.-]`, for
//! example `$TITLE` or `$AUTHOR_NAME`. Configuration keys are upper-cased,
//! so `$x` in inline math is never a placeholder.
//!
//! All configured names are compiled into a single alternation and every
//! occurrence is replaced in one pass, so a replacement value is never
//! scanned again.
//!
//! # Example
//!
//! ```
//! use scriptorium::scaffold::substitution::{unresolved, Substitution};
//! use std::collections::BTreeMap;
//!
//! let mut config = BTreeMap::new();
//! config.insert("TITLE".to_string(), "On Rust".to_string());
//!
//! let text = Substitution::new(&config)?.apply("# $TITLE by $AUTHOR");
//! assert_eq!(text, "# On Rust by $AUTHOR");
//!
//! let left = unresolved([text.as_str()]);
//! assert!(left.contains("author"));
//! # Ok::<(), scriptorium::ScriptoriumError>(())
//! ```

use crate::error::Result;
use anyhow::Context;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Grammar of a placeholder, used for leftover detection.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z0-9_.\-]+").unwrap());

/// A compiled set of placeholder replacements.
#[derive(Debug, Clone)]
pub struct Substitution {
    values: BTreeMap<String, String>,
    pattern: Option<Regex>,
}

impl Substitution {
    /// Compile `config` into a single matcher. Keys are upper-cased.
    ///
    /// Fails when the combined pattern cannot be compiled, for example when
    /// it exceeds the regex size limit.
    pub fn new(config: &BTreeMap<String, String>) -> Result<Self> {
        let values: BTreeMap<String, String> = config
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| (k.to_uppercase(), v.clone()))
            .collect();

        let pattern = if values.is_empty() {
            None
        } else {
            // Longest names first so `$AUTHOR_NAME` is not taken as `$AUTHOR`.
            let mut names: Vec<&str> = values.keys().map(String::as_str).collect();
            names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let alternation = names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"\$(?:{})", alternation))
                .with_context(|| format!("Failed to compile {} placeholder names", names.len()))?;
            Some(pattern)
        };

        Ok(Self { values, pattern })
    }

    /// Replace every configured placeholder in `text`.
    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                match self.values.get(&caps[0][1..]) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Whether any placeholder would be replaced.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitute `config` into every text, keeping the keys of `texts`.
pub fn expand(
    texts: &BTreeMap<String, String>,
    config: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let substitution = Substitution::new(config)?;
    Ok(texts
        .iter()
        .map(|(name, text)| (name.clone(), substitution.apply(text)))
        .collect())
}

/// Distinct placeholder names remaining in `texts`, lower-cased.
pub fn unresolved<'a, I>(texts: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .flat_map(placeholder_names)
        .map(|name| name.to_lowercase())
        .collect()
}

/// Placeholder names (without `$`) occurring in `text`, in order.
pub fn placeholder_names(text: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .find_iter(text)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}
