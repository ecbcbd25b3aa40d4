//! The paper build pipeline.
//!
//! A build runs these stages in order:
//!
//! 1. **Resolve** the paper directory and its root document.
//! 2. **Convert** every `.mmd` file to a same-named `.tex` file.
//! 3. **Typeset** the root document once.
//! 4. **Bibliography**, only when the root source has a `bibtex:` line:
//!    bibtex or biber, chosen from the typesetting output.
//! 5. **Retypeset** twice so citations and cross-references settle.
//!
//! The process working directory is never changed; every tool runs with the
//! paper directory as its own working directory.

use crate::error::{Result, ScriptoriumError};
use crate::paper::resolver::{find_root, get_template, source_files};
use crate::registry::TemplateRegistry;
use crate::toolchain::{search_path, BibEngine, Toolchain, TypesetJob, TEXINPUTS};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static BIBTEX_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mi)^bibtex:").unwrap());

/// Number of typesetting passes after the bibliography is processed.
pub const RETYPESET_PASSES: usize = 2;

/// Build settings chosen per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Allow the LaTeX engine to run external commands.
    pub shell_escape: bool,
}

/// Stages reported while a build runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Resolve,
    Convert,
    Typeset,
    Bibliography,
    Retypeset,
    Done,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BuildStage::Resolve => "Locating root document",
            BuildStage::Convert => "Converting sources to LaTeX",
            BuildStage::Typeset => "Typesetting",
            BuildStage::Bibliography => "Processing bibliography",
            BuildStage::Retypeset => "Resolving references",
            BuildStage::Done => "Done",
        };
        f.write_str(text)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// The generated PDF.
    pub artifact: PathBuf,
    /// The root document.
    pub root: PathBuf,
    /// Template named by the root document.
    pub template: String,
    /// Number of typesetting passes run.
    pub passes: usize,
    /// Bibliography engine used, if the paper has a bibliography.
    pub bibliography: Option<BibEngine>,
}

/// A paper directory and its root document, both absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLocation {
    /// Directory holding the paper sources.
    pub dir: PathBuf,
    /// The root document.
    pub root: PathBuf,
}

impl PaperLocation {
    /// Root file name without extension.
    pub fn base_name(&self) -> String {
        self.root
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Builds papers with a toolchain and a template registry.
pub struct Pipeline<'a> {
    toolchain: &'a Toolchain,
    registry: &'a TemplateRegistry,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline.
    pub fn new(toolchain: &'a Toolchain, registry: &'a TemplateRegistry) -> Self {
        Self {
            toolchain,
            registry,
        }
    }

    /// Build the paper at `target` (a paper directory or its root file).
    pub fn build(&self, target: &Path, options: BuildOptions) -> Result<BuildOutcome> {
        self.build_with(target, options, |_| {})
    }

    /// Build, reporting each stage to `on_stage` as it starts.
    pub fn build_with<F>(
        &self,
        target: &Path,
        options: BuildOptions,
        mut on_stage: F,
    ) -> Result<BuildOutcome>
    where
        F: FnMut(BuildStage),
    {
        on_stage(BuildStage::Resolve);
        let paper = self.locate(target)?;
        let base = paper.base_name();
        tracing::debug!(dir = %paper.dir.display(), root = %paper.root.display(), "Resolved paper");

        on_stage(BuildStage::Convert);
        for source in source_files(&paper.dir)? {
            let output = source.with_extension("tex");
            self.toolchain.converter.convert(&source, &output)?;
        }

        let template_name = get_template(self.toolchain.converter.as_ref(), &paper.root)?
            .ok_or_else(|| ScriptoriumError::NoTemplateMetadata {
                path: paper.root.clone(),
            })?;
        let template = self.registry.find(&template_name)?;
        tracing::debug!(template = %template_name, path = %template.path.display(), "Resolved template");

        let existing = std::env::var(TEXINPUTS).ok();
        let job = TypesetJob {
            working_dir: paper.dir.clone(),
            tex_file: format!("{}.tex", base),
            search_path: search_path(&paper.dir, template.parent_dir(), existing.as_deref()),
            shell_escape: options.shell_escape,
        };

        on_stage(BuildStage::Typeset);
        self.toolchain.typesetter.typeset(&job)?;
        let mut passes = 1;

        let source = fs::read_to_string(&paper.root)?;
        let bibliography = if needs_bibliography(&source) {
            on_stage(BuildStage::Bibliography);
            let engine = select_bib_engine(&paper.dir, &base)?;
            self.toolchain
                .bibliography
                .process(engine, &paper.dir, &base)?;

            on_stage(BuildStage::Retypeset);
            for _ in 0..RETYPESET_PASSES {
                self.toolchain.typesetter.typeset(&job)?;
                passes += 1;
            }
            Some(engine)
        } else {
            None
        };

        on_stage(BuildStage::Done);
        let artifact = paper.dir.join(format!("{}.pdf", base));
        tracing::debug!(artifact = %artifact.display(), passes, "Build finished");

        Ok(BuildOutcome {
            artifact,
            root: paper.root,
            template: template_name,
            passes,
            bibliography,
        })
    }

    /// Resolve `target` to a paper directory and root document.
    pub fn locate(&self, target: &Path) -> Result<PaperLocation> {
        locate_paper(self.toolchain.converter.as_ref(), target)
    }
}

/// Resolve `target` (directory or root file) to absolute paper paths.
pub fn locate_paper(
    converter: &dyn crate::toolchain::Converter,
    target: &Path,
) -> Result<PaperLocation> {
    let not_a_directory = || ScriptoriumError::NotADirectory {
        path: target.to_path_buf(),
    };

    let target = target.canonicalize().map_err(|_| not_a_directory())?;

    if target.is_file() {
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(not_a_directory)?;
        return Ok(PaperLocation { dir, root: target });
    }

    if !target.is_dir() {
        return Err(not_a_directory());
    }

    let root = find_root(converter, &target)?
        .ok_or_else(|| ScriptoriumError::NoRootDocument {
            path: target.clone(),
        })?;
    Ok(PaperLocation { dir: target, root })
}

/// Whether the root source asks for a bibliography (a `bibtex:` line).
pub fn needs_bibliography(source: &str) -> bool {
    BIBTEX_DIRECTIVE.is_match(source)
}

/// Choose the bibliography engine from the first typesetting pass.
///
/// `\bibdata` in `<base>.aux` means bibtex; otherwise a `<base>.bcf` file
/// means biber. Anything else is an error.
pub fn select_bib_engine(paper_dir: &Path, base: &str) -> Result<BibEngine> {
    let aux = paper_dir.join(format!("{}.aux", base));
    if !aux.is_file() {
        return Err(ScriptoriumError::AuxiliaryFileMissing { path: aux });
    }

    let content = String::from_utf8_lossy(&fs::read(&aux)?).into_owned();
    if content.contains(r"\bibdata") {
        return Ok(BibEngine::Bibtex);
    }
    if paper_dir.join(format!("{}.bcf", base)).is_file() {
        return Ok(BibEngine::Biber);
    }

    Err(ScriptoriumError::BibliographyEngineUndetermined { aux })
}
