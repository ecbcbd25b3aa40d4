//! Markup-to-LaTeX conversion and metadata extraction.

use crate::error::Result;
use crate::shell::{run_checked, CommandOptions};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

/// Converts paper sources to LaTeX and reads their metadata.
pub trait Converter {
    /// Value of metadata `key` in `file`, or `None` when unset or empty.
    fn extract_metadata(&self, file: &Path, key: &str) -> Result<Option<String>>;

    /// Convert `source` into a LaTeX document at `output`.
    fn convert(&self, source: &Path, output: &Path) -> Result<()>;
}

/// The `multimarkdown` command-line converter.
#[derive(Debug, Clone)]
pub struct MultiMarkdown {
    program: String,
    timeout: Option<Duration>,
}

impl MultiMarkdown {
    /// Converter invoking `multimarkdown` from `PATH`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_program("multimarkdown", timeout)
    }

    /// Converter invoking a specific executable.
    pub fn with_program(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn options_for(&self, file: &Path) -> CommandOptions {
        let mut options = CommandOptions {
            timeout: self.timeout,
            ..Default::default()
        };
        if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
            options.cwd = Some(dir.to_path_buf());
        }
        options
    }
}

impl Converter for MultiMarkdown {
    fn extract_metadata(&self, file: &Path, key: &str) -> Result<Option<String>> {
        let result = run_checked(
            &self.program,
            &[OsStr::new("-e"), OsStr::new(key), file.as_os_str()],
            &self.options_for(file),
        )?;
        let value = result.stdout.trim();
        Ok(if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        })
    }

    fn convert(&self, source: &Path, output: &Path) -> Result<()> {
        tracing::debug!(source = %source.display(), output = %output.display(), "Converting to LaTeX");
        run_checked(
            &self.program,
            &[
                OsStr::new("-t"),
                OsStr::new("latex"),
                OsStr::new("-o"),
                output.as_os_str(),
                source.as_os_str(),
            ],
            &self.options_for(source),
        )?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ScriptoriumError;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A stand-in `multimarkdown` that answers `-e` from a `key: value`
    /// line in the file and records conversions.
    fn fake_multimarkdown(dir: &Path) -> PathBuf {
        let path = dir.join("fake-mmd");
        fs::write(
            &path,
            r#"#!/bin/sh
if [ "$1" = "-e" ]; then
  sed -n "s/^$2: *//p" "$3"
  exit 0
fi
if [ "$1" = "-t" ]; then
  cp "$5" "$4"
  exit 0
fi
echo "unexpected arguments" >&2
exit 2
"#,
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn extract_metadata_returns_value() {
        let temp = TempDir::new().unwrap();
        let mmd = MultiMarkdown::with_program(
            fake_multimarkdown(temp.path()).to_string_lossy(),
            None,
        );
        let paper = temp.path().join("paper.mmd");
        fs::write(&paper, "latexfooter: article/footer.tex\n").unwrap();

        let value = mmd.extract_metadata(&paper, "latexfooter").unwrap();
        assert_eq!(value.as_deref(), Some("article/footer.tex"));
    }

    #[test]
    fn extract_metadata_empty_is_none() {
        let temp = TempDir::new().unwrap();
        let mmd = MultiMarkdown::with_program(
            fake_multimarkdown(temp.path()).to_string_lossy(),
            None,
        );
        let chapter = temp.path().join("chapter.mmd");
        fs::write(&chapter, "# Just text\n").unwrap();

        assert_eq!(mmd.extract_metadata(&chapter, "latexfooter").unwrap(), None);
    }

    #[test]
    fn convert_writes_output() {
        let temp = TempDir::new().unwrap();
        let mmd = MultiMarkdown::with_program(
            fake_multimarkdown(temp.path()).to_string_lossy(),
            None,
        );
        let source = temp.path().join("paper.mmd");
        let output = temp.path().join("paper.tex");
        fs::write(&source, "body").unwrap();

        mmd.convert(&source, &output).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "body");
    }

    #[test]
    fn missing_converter_is_tool_failure() {
        let mmd = MultiMarkdown::with_program("scriptorium-no-such-converter", None);
        let err = mmd
            .extract_metadata(Path::new("/nonexistent/paper.mmd"), "latexfooter")
            .unwrap_err();
        assert!(matches!(err, ScriptoriumError::ToolInvocationFailed { .. }));
    }
}
