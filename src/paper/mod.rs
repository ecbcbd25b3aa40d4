//! Papers: finding the root document and building the PDF.

pub mod build;
pub mod resolver;

pub use build::{
    locate_paper, needs_bibliography, select_bib_engine, BuildOptions, BuildOutcome, BuildStage,
    PaperLocation, Pipeline,
};
pub use resolver::{find_root, get_template, source_files, template_from_footer, FOOTER_KEY};
