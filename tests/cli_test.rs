//! Integration tests for the scriptorium binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A scriptorium command isolated in `home` (config file and templates).
fn scriptorium(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.env_remove("SCRIPTORIUM_CONFIG");
    cmd.arg("--config").arg(home.join("config"));
    cmd
}

fn install_template(home: &Path, name: &str, frontmatter: &str) {
    let dir = home.join("templates").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("setup.tex"), "% setup").unwrap();
    fs::write(dir.join("footer.tex"), "% footer").unwrap();
    fs::write(dir.join("frontmatter.mmd"), frontmatter).unwrap();
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Build academic papers"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn cli_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.arg("publish");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn info_missing_directory_exits_7() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    scriptorium(home.path())
        .args(["info"])
        .arg(home.path().join("nowhere"))
        .assert()
        .code(7)
        .stderr(predicate::str::contains("is not a valid directory"));
    Ok(())
}

#[test]
fn info_without_root_document_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let paper = home.path().join("paper");
    fs::create_dir_all(&paper)?;
    fs::write(paper.join("notes.txt"), "not markdown")?;

    scriptorium(home.path())
        .arg("info")
        .arg(&paper)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("root of the paper"));
    Ok(())
}

#[test]
fn build_missing_directory_exits_7() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    scriptorium(home.path())
        .arg("build")
        .arg(home.path().join("nowhere"))
        .assert()
        .code(7);
    Ok(())
}

#[test]
fn new_creates_paper() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    install_template(
        home.path(),
        "article",
        "Title: $TITLE\nlatexfooter: $TEMPLATE/footer.tex\n",
    );
    let dest = home.path().join("draft");

    scriptorium(home.path())
        .arg("new")
        .arg(&dest)
        .args(["-t", "article", "-c", "title", "On Proofs"])
        .assert()
        .success();

    let paper = fs::read_to_string(dest.join("paper.mmd"))?;
    assert_eq!(paper, "Title: On Proofs\nlatexfooter: article/footer.tex\n");
    assert!(dest.join(".gitignore").exists());
    Ok(())
}

#[test]
fn new_reports_unset_variables_with_exit_3() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    install_template(home.path(), "article", "Title: $TITLE\nAuthor: $AUTHOR\n");
    let dest = home.path().join("draft");

    scriptorium(home.path())
        .arg("new")
        .arg(&dest)
        .args(["-t", "article", "-c", "title", "T"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("author"));

    assert!(dest.join("paper.mmd").exists());
    Ok(())
}

#[test]
fn new_refuses_existing_directory() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    install_template(home.path(), "article", "Title: $TITLE\n");
    let dest = home.path().join("draft");
    fs::create_dir_all(&dest)?;
    fs::write(dest.join("paper.mmd"), "my work")?;

    scriptorium(home.path())
        .arg("new")
        .arg(&dest)
        .args(["-t", "article"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(dest.join("paper.mmd"))?, "my work");
    Ok(())
}

#[test]
fn new_unknown_template_exits_4() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    scriptorium(home.path())
        .arg("new")
        .arg(home.path().join("draft"))
        .args(["-t", "thesis"])
        .assert()
        .code(4);
    assert!(!home.path().join("draft").exists());
    Ok(())
}

#[test]
fn template_list_shows_installed() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    install_template(home.path(), "ieee", "");
    install_template(home.path(), "acm", "");

    scriptorium(home.path())
        .args(["template", "-l"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acm\nieee"));
    Ok(())
}

#[test]
fn template_dir_override() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let other = TempDir::new()?;
    let dir = other.path().join("thesis");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("setup.tex"), "")?;

    scriptorium(home.path())
        .args(["template", "-l", "-d"])
        .arg(other.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("thesis"));
    Ok(())
}

#[test]
fn template_variables() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    install_template(home.path(), "article", "Title: $TITLE\nAuthor: $AUTHOR\n");

    scriptorium(home.path())
        .args(["template", "-v", "article"])
        .assert()
        .success()
        .stdout(predicate::str::contains("author\ntitle"));
    Ok(())
}

#[test]
fn config_set_then_get() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scriptorium(home.path())
        .args(["config", "LATEX_CMD", "xelatex"])
        .assert()
        .success();

    assert!(home.path().join("config").exists());

    scriptorium(home.path())
        .args(["config", "latex_cmd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xelatex"));
    Ok(())
}

#[test]
fn config_list_shows_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scriptorium(home.path())
        .args(["config", "-l"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LATEX_CMD = pdflatex"))
        .stdout(predicate::str::contains("TOOL_TIMEOUT = 300"));

    assert!(!home.path().join("config").exists());
    Ok(())
}

#[test]
fn config_unknown_key_exits_8() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    scriptorium(home.path())
        .args(["config", "colour", "blue"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Unknown configuration key"));
    Ok(())
}

#[test]
fn config_file_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    fs::write(home.path().join("config"), "LATEX_CMD: lualatex\n")?;

    Command::new(cargo_bin("scriptorium"))
        .env("SCRIPTORIUM_CONFIG", home.path().join("config"))
        .args(["config", "latex_cmd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lualatex"));
    Ok(())
}

#[test]
fn doctor_reports_missing_programs() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let empty = TempDir::new()?;

    scriptorium(home.path())
        .env("PATH", empty.path())
        .arg("doctor")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing package multimarkdown"));
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptorium"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scriptorium"));
    Ok(())
}

#[cfg(unix)]
mod fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// A bin directory with stand-ins for multimarkdown and pdflatex.
    fn fake_bin(root: &Path) -> std::path::PathBuf {
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        write_script(
            &bin,
            "multimarkdown",
            "if [ \"$1\" = \"-e\" ]; then\n  sed -n \"s/^$2: *//p\" \"$3\"\nelse\n  cp \"$5\" \"$4\"\nfi\n",
        );
        write_script(
            &bin,
            "pdflatex",
            "for last; do :; done\necho \"$TEXINPUTS\" > texinputs.txt\ntouch \"${last%.tex}.pdf\"\n",
        );
        write_script(&bin, "failtex", "echo '! Undefined control sequence.'\nexit 1\n");
        bin
    }

    fn path_with(bin: &Path) -> String {
        format!("{}:/usr/bin:/bin", bin.display())
    }

    fn paper(home: &Path) -> std::path::PathBuf {
        install_template(home, "article", "");
        let paper = home.join("paper");
        fs::create_dir_all(&paper).unwrap();
        fs::write(
            paper.join("paper.mmd"),
            "Title: Test\nlatexfooter: article/footer.tex\n",
        )
        .unwrap();
        paper
    }

    #[test]
    fn build_produces_pdf() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let bin = fake_bin(home.path());
        let paper = paper(home.path());

        scriptorium(home.path())
            .env("PATH", path_with(&bin))
            .env_remove("TEXINPUTS")
            .arg("build")
            .arg(&paper)
            .assert()
            .success();

        assert!(paper.join("paper.tex").exists());
        assert!(paper.join("paper.pdf").exists());
        let texinputs = fs::read_to_string(paper.join("texinputs.txt"))?;
        assert!(texinputs.contains("templates//"));
        Ok(())
    }

    #[test]
    fn build_moves_output() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let bin = fake_bin(home.path());
        let paper = paper(home.path());
        let out = home.path().join("final.pdf");

        scriptorium(home.path())
            .env("PATH", path_with(&bin))
            .arg("build")
            .arg(&paper)
            .arg("-o")
            .arg(&out)
            .assert()
            .success();

        assert!(out.exists());
        assert!(!paper.join("paper.pdf").exists());
        Ok(())
    }

    #[test]
    fn rebuild_with_output_onto_own_artifact() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let bin = fake_bin(home.path());
        let paper = paper(home.path());

        for _ in 0..2 {
            scriptorium(home.path())
                .env("PATH", path_with(&bin))
                .current_dir(&paper)
                .args(["build", ".", "-o", "paper.pdf"])
                .assert()
                .success();
        }

        assert!(paper.join("paper.pdf").exists());
        Ok(())
    }

    #[test]
    fn info_prints_root_and_template() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let bin = fake_bin(home.path());
        let paper = paper(home.path());

        scriptorium(home.path())
            .env("PATH", path_with(&bin))
            .arg("info")
            .arg(&paper)
            .assert()
            .success()
            .stdout(predicate::str::contains("paper.mmd"));

        scriptorium(home.path())
            .env("PATH", path_with(&bin))
            .arg("info")
            .arg(&paper)
            .arg("-t")
            .assert()
            .success()
            .stdout(predicate::str::contains("article"));
        Ok(())
    }

    #[test]
    fn typesetting_failure_exits_6_with_output() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let bin = fake_bin(home.path());
        let paper = paper(home.path());
        fs::write(home.path().join("config"), "LATEX_CMD: failtex\n")?;

        scriptorium(home.path())
            .env("PATH", path_with(&bin))
            .arg("build")
            .arg(&paper)
            .assert()
            .code(6)
            .stderr(predicate::str::contains("Undefined control sequence"));
        Ok(())
    }
}
