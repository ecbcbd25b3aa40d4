//! Info command implementation.
//!
//! The `scriptorium info` command reports a paper's root document, or the
//! template it is typeset with.

use crate::cli::args::InfoArgs;
use crate::config::{ConfigPaths, Settings};
use crate::error::{Result, ScriptoriumError};
use crate::paper::{get_template, locate_paper};
use crate::toolchain::{Converter, MultiMarkdown};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The info command implementation.
pub struct InfoCommand {
    paths: ConfigPaths,
    args: InfoArgs,
}

impl InfoCommand {
    /// Create a new info command.
    pub fn new(paths: &ConfigPaths, args: InfoArgs) -> Self {
        Self {
            paths: paths.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InfoArgs {
        &self.args
    }

    /// Report using an explicit converter.
    pub fn run(&self, converter: &dyn Converter, ui: &mut dyn UserInterface) -> Result<()> {
        let paper = locate_paper(converter, &self.args.paper)?;

        if self.args.template {
            let template = get_template(converter, &paper.root)?.ok_or_else(|| {
                ScriptoriumError::NoTemplateMetadata {
                    path: paper.root.clone(),
                }
            })?;
            ui.output(&template);
        } else {
            let name = paper
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.output(&name);
        }
        Ok(())
    }
}

impl Command for InfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.paths)?;
        let converter = MultiMarkdown::new(Some(settings.timeout()));
        self.run(&converter, ui)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Treats `key: value` lines as metadata.
    struct LineConverter;

    impl Converter for LineConverter {
        fn extract_metadata(&self, file: &Path, key: &str) -> Result<Option<String>> {
            let text = fs::read_to_string(file)?;
            let prefix = format!("{}:", key);
            Ok(text
                .lines()
                .find_map(|l| l.strip_prefix(&prefix))
                .map(|v| v.trim().to_string()))
        }

        fn convert(&self, _source: &Path, _output: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn command(dir: &Path, template: bool) -> InfoCommand {
        InfoCommand::new(
            &ConfigPaths::with_root(dir),
            InfoArgs {
                paper: dir.to_path_buf(),
                template,
            },
        )
    }

    #[test]
    fn prints_root_document() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("appendix.mmd"), "Just text\n").unwrap();
        fs::write(
            temp.path().join("paper.mmd"),
            "latexfooter: ieee/footer.tex\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        command(temp.path(), false).run(&LineConverter, &mut ui).unwrap();

        assert_eq!(ui.outputs(), &["paper.mmd"]);
    }

    #[test]
    fn prints_template_name() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("paper.mmd"),
            "latexfooter: ieee/footer.tex\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        command(temp.path(), true).run(&LineConverter, &mut ui).unwrap();

        assert_eq!(ui.outputs(), &["ieee"]);
    }

    #[test]
    fn no_root_document_exits_one() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.mmd"), "Nothing here\n").unwrap();
        let mut ui = MockUI::new();

        let err = command(temp.path(), false)
            .run(&LineConverter, &mut ui)
            .unwrap_err();

        assert!(matches!(err, ScriptoriumError::NoRootDocument { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn root_file_target_without_footer_exits_two() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("paper.mmd");
        fs::write(&file, "Title: Draft\n").unwrap();
        let cmd = InfoCommand::new(
            &ConfigPaths::with_root(temp.path()),
            InfoArgs {
                paper: PathBuf::from(&file),
                template: true,
            },
        );
        let mut ui = MockUI::new();

        let err = cmd.run(&LineConverter, &mut ui).unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }
}
