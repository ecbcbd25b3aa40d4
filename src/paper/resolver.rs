//! Locating a paper's root document and the template it uses.
//!
//! The root document is the one source file whose `latexfooter` metadata
//! points at `<template>/footer.tex`. Every other `.mmd` file in the paper
//! directory is an included chapter or section.

use crate::error::Result;
use crate::toolchain::Converter;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Metadata key naming the template footer.
pub const FOOTER_KEY: &str = "latexfooter";

/// Extension of paper source files.
pub const SOURCE_EXTENSION: &str = "mmd";

static FOOTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<template>[A-Za-z0-9._\-]*)/footer\.tex").unwrap());

/// Template name from a `latexfooter` value such as `article/footer.tex`.
pub fn template_from_footer(footer: &str) -> Option<String> {
    FOOTER_REGEX
        .captures(footer)
        .and_then(|caps| caps.name("template"))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}

/// The template named by `file`'s footer metadata, if any.
pub fn get_template(converter: &dyn Converter, file: &Path) -> Result<Option<String>> {
    let footer = converter.extract_metadata(file, FOOTER_KEY)?;
    Ok(footer.as_deref().and_then(template_from_footer))
}

/// All `.mmd` files directly inside `dir`, sorted by file name.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == SOURCE_EXTENSION)
                .unwrap_or(false)
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// The root document of the paper in `dir`.
///
/// Candidates are checked in file-name order and the first with template
/// metadata wins. If several qualify a warning is logged.
pub fn find_root(converter: &dyn Converter, dir: &Path) -> Result<Option<PathBuf>> {
    let mut roots = Vec::new();
    for file in source_files(dir)? {
        if get_template(converter, &file)?.is_some() {
            roots.push(file);
        }
    }

    if roots.len() > 1 {
        tracing::warn!(
            dir = %dir.display(),
            candidates = ?roots.iter().filter_map(|r| r.file_name()).collect::<Vec<_>>(),
            "Several files name a template; using the first"
        );
    }

    Ok(roots.into_iter().next())
}
