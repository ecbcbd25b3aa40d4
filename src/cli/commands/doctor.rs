//! Doctor command implementation.
//!
//! The `scriptorium doctor` command checks that every external program a
//! build needs is on `PATH`.

use crate::config::{ConfigPaths, Settings};
use crate::error::Result;
use crate::requirements::{required_packages, RequirementChecker};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    paths: ConfigPaths,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(paths: &ConfigPaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    /// Check the packages required by `settings` with `checker`.
    pub fn run(
        &self,
        settings: &Settings,
        checker: &RequirementChecker,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        ui.show_header("Checking external programs");

        let packages = required_packages(settings);
        let missing = checker.missing(&packages);

        for package in &packages {
            let absent = missing.iter().find(|m| m.name == package.name);
            match absent {
                None => ui.success(&format!("{} ({})", package.name, package.binaries.join(", "))),
                Some(m) => ui.error(&format!(
                    "Missing package {}: {} not found",
                    m.name,
                    m.binaries.join(", ")
                )),
            }
        }

        if missing.is_empty() {
            CommandResult::success()
        } else {
            ui.show_hint("Install the missing programs and make sure they are on PATH");
            CommandResult::failure(1)
        }
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.paths)?;
        Ok(self.run(&settings, &RequirementChecker::from_env(), ui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn empty_path_reports_every_package() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_root(temp.path());
        let settings = Settings::with_template_dir(temp.path().join("templates"));
        let mut ui = MockUI::new();

        let result = DoctorCommand::new(&paths).run(
            &settings,
            &RequirementChecker::new(vec![]),
            &mut ui,
        );

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors().len(), 3);
        assert!(ui.has_error("Missing package multimarkdown"));
        assert!(ui.has_error("biber"));
    }

    #[cfg(unix)]
    #[test]
    fn all_present_succeeds() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        for tool in ["git", "lualatex", "bibtex", "biber", "multimarkdown"] {
            let path = bin.join(tool);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let mut settings = Settings::with_template_dir(temp.path().join("templates"));
        settings.latex_cmd = "lualatex".into();
        let mut ui = MockUI::new();

        let result = DoctorCommand::new(&ConfigPaths::with_root(temp.path())).run(
            &settings,
            &RequirementChecker::new(vec![bin]),
            &mut ui,
        );

        assert!(result.success);
        assert!(ui.errors().is_empty());
        assert_eq!(ui.successes().len(), 3);
    }
}
