//! Bibliography processing with bibtex or biber.

use crate::error::Result;
use crate::shell::{run_checked, CommandOptions};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// A bibliography processor program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BibEngine {
    /// Classic BibTeX, selected by `\bibdata` in the auxiliary file.
    Bibtex,
    /// Biber, selected by a `.bcf` control file from biblatex.
    Biber,
}

impl BibEngine {
    /// Executable name.
    pub fn program(&self) -> &'static str {
        match self {
            BibEngine::Bibtex => "bibtex",
            BibEngine::Biber => "biber",
        }
    }
}

impl fmt::Display for BibEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Runs a bibliography engine over a typeset document.
pub trait BibliographyProcessor {
    /// Run `engine` on document `base` (no extension) inside `working_dir`.
    fn process(&self, engine: BibEngine, working_dir: &Path, base: &str) -> Result<()>;
}

/// Runs `bibtex` or `biber` from `PATH`.
#[derive(Debug, Clone, Default)]
pub struct BibliographyRunner {
    timeout: Option<Duration>,
}

impl BibliographyRunner {
    /// Create a runner with the given per-invocation deadline.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl BibliographyProcessor for BibliographyRunner {
    fn process(&self, engine: BibEngine, working_dir: &Path, base: &str) -> Result<()> {
        tracing::debug!(%engine, base, "Processing bibliography");
        let options = CommandOptions::in_dir(working_dir, self.timeout);
        run_checked(engine.program(), &[base], &options)?;
        Ok(())
    }
}
