//! External tools behind trait seams.
//!
//! The build pipeline only talks to [`Converter`], [`TypesetEngine`] and
//! [`BibliographyProcessor`]. [`Toolchain::system`] wires up the real
//! programs; tests supply recording fakes instead.

pub mod bibliography;
pub mod converter;
pub mod typeset;

pub use bibliography::{BibEngine, BibliographyProcessor, BibliographyRunner};
pub use converter::{Converter, MultiMarkdown};
pub use typeset::{search_path, LatexEngine, TypesetEngine, TypesetJob, TEXINPUTS};

use crate::config::Settings;

/// The three external tools a build needs.
pub struct Toolchain {
    /// Markup converter.
    pub converter: Box<dyn Converter>,
    /// LaTeX engine.
    pub typesetter: Box<dyn TypesetEngine>,
    /// Bibliography processor.
    pub bibliography: Box<dyn BibliographyProcessor>,
}

impl Toolchain {
    /// Assemble a toolchain from explicit parts.
    pub fn new(
        converter: Box<dyn Converter>,
        typesetter: Box<dyn TypesetEngine>,
        bibliography: Box<dyn BibliographyProcessor>,
    ) -> Self {
        Self {
            converter,
            typesetter,
            bibliography,
        }
    }

    /// The installed programs, configured from `settings`.
    pub fn system(settings: &Settings) -> Self {
        let timeout = Some(settings.timeout());
        Self::new(
            Box::new(MultiMarkdown::new(timeout)),
            Box::new(LatexEngine::new(settings.latex_cmd.clone(), timeout)),
            Box::new(BibliographyRunner::new(timeout)),
        )
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain").finish_non_exhaustive()
    }
}
