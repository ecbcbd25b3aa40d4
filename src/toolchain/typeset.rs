//! Driving the LaTeX engine.

use crate::error::Result;
use crate::shell::{run_checked, search_path_separator, CommandOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the LaTeX input search path.
pub const TEXINPUTS: &str = "TEXINPUTS";

/// One typesetting invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetJob {
    /// Directory the engine runs in (the paper directory).
    pub working_dir: PathBuf,
    /// The `.tex` file name, relative to `working_dir`.
    pub tex_file: String,
    /// Value for `TEXINPUTS`.
    pub search_path: String,
    /// Pass `-shell-escape` to the engine.
    pub shell_escape: bool,
}

/// Runs one typesetting pass.
pub trait TypesetEngine {
    /// Typeset `job`. A non-zero exit is an error carrying the engine output.
    fn typeset(&self, job: &TypesetJob) -> Result<()>;
}

/// A pdflatex-compatible engine invoked by command name.
#[derive(Debug, Clone)]
pub struct LatexEngine {
    command: String,
    timeout: Option<Duration>,
}

impl LatexEngine {
    /// Engine invoking `command` (e.g. `pdflatex`, `xelatex`).
    pub fn new(command: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    /// The configured command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments for `job`.
    pub fn args(job: &TypesetJob) -> Vec<String> {
        let mut args = vec![
            "-halt-on-error".to_string(),
            "-interaction=nonstopmode".to_string(),
        ];
        if job.shell_escape {
            args.push("-shell-escape".to_string());
        }
        args.push(job.tex_file.clone());
        args
    }
}

impl TypesetEngine for LatexEngine {
    fn typeset(&self, job: &TypesetJob) -> Result<()> {
        let options = CommandOptions::in_dir(&job.working_dir, self.timeout)
            .with_env(TEXINPUTS, job.search_path.clone());
        run_checked(&self.command, &Self::args(job), &options)?;
        Ok(())
    }
}

/// Build the `TEXINPUTS` value for a paper.
///
/// Order: the paper directory, the template's parent directory searched
/// recursively (`//`), then `existing`. Without an existing value a trailing
/// empty entry keeps the engine's built-in search path.
pub fn search_path(paper_dir: &Path, template_parent: &Path, existing: Option<&str>) -> String {
    let sep = search_path_separator().to_string();
    let template = template_parent.display().to_string();
    let template = template.trim_end_matches(['/', '\\']);

    let mut entries = vec![paper_dir.display().to_string(), format!("{}//", template)];
    match existing {
        Some(value) if !value.is_empty() => entries.push(value.to_string()),
        _ => entries.push(String::new()),
    }
    entries.join(&sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(shell_escape: bool) -> TypesetJob {
        TypesetJob {
            working_dir: PathBuf::from("/papers/draft"),
            tex_file: "paper.tex".into(),
            search_path: String::new(),
            shell_escape,
        }
    }

    #[test]
    fn args_without_shell_escape() {
        assert_eq!(
            LatexEngine::args(&job(false)),
            vec!["-halt-on-error", "-interaction=nonstopmode", "paper.tex"]
        );
    }

    #[test]
    fn args_with_shell_escape() {
        let args = LatexEngine::args(&job(true));
        assert!(args.contains(&"-shell-escape".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("paper.tex"));
    }

    #[cfg(unix)]
    #[test]
    fn search_path_appends_existing_value() {
        let value = search_path(
            Path::new("/papers/draft"),
            Path::new("/home/me/.scriptorium/templates"),
            Some("/usr/share/texmf//"),
        );
        assert_eq!(
            value,
            "/papers/draft:/home/me/.scriptorium/templates//:/usr/share/texmf//"
        );
    }

    #[cfg(unix)]
    #[test]
    fn search_path_keeps_default_with_trailing_separator() {
        let value = search_path(Path::new("/p"), Path::new("/t/"), None);
        assert_eq!(value, "/p:/t//:");
    }

    #[cfg(unix)]
    #[test]
    fn typeset_runs_in_working_dir_with_texinputs() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let engine_path = temp.path().join("fake-latex");
        fs::write(
            &engine_path,
            "#!/bin/sh\necho \"$@\" > args.txt\necho \"$TEXINPUTS\" > texinputs.txt\n",
        )
        .unwrap();
        fs::set_permissions(&engine_path, fs::Permissions::from_mode(0o755)).unwrap();

        let engine = LatexEngine::new(engine_path.to_string_lossy(), None);
        let job = TypesetJob {
            working_dir: temp.path().to_path_buf(),
            tex_file: "paper.tex".into(),
            search_path: "/a:/b//:".into(),
            shell_escape: true,
        };
        engine.typeset(&job).unwrap();

        let args = fs::read_to_string(temp.path().join("args.txt")).unwrap();
        assert_eq!(
            args.trim(),
            "-halt-on-error -interaction=nonstopmode -shell-escape paper.tex"
        );
        let texinputs = fs::read_to_string(temp.path().join("texinputs.txt")).unwrap();
        assert_eq!(texinputs.trim(), "/a:/b//:");
    }

    #[cfg(unix)]
    #[test]
    fn failing_engine_reports_output() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let engine_path = temp.path().join("broken-latex");
        fs::write(
            &engine_path,
            "#!/bin/sh\necho \"! LaTeX Error: File missing.sty not found.\"\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&engine_path, fs::Permissions::from_mode(0o755)).unwrap();

        let engine = LatexEngine::new(engine_path.to_string_lossy(), None);
        let err = engine.typeset(&job_in(temp.path())).unwrap_err();

        assert_eq!(err.exit_code(), 6);
        assert!(err.diagnostic().unwrap().contains("missing.sty"));
    }

    #[cfg(unix)]
    fn job_in(dir: &Path) -> TypesetJob {
        TypesetJob {
            working_dir: dir.to_path_buf(),
            ..job(false)
        }
    }
}
