//! Git-backed template installation.
//!
//! Templates are distributed as git repositories. Installing clones the
//! repository into the template directory under the repository's own name;
//! updating fetches from `origin` and fast-forwards, or checks out a
//! requested revision.

use crate::error::{Result, ScriptoriumError};
use crate::registry::local::TemplateRegistry;
use anyhow::{anyhow, bail};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

static REPO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"((git|ssh|http(s)?)(:(//)?)|(?P<user>[\w\d]*)@)?(?P<host>[\w\.]+).*/(?P<dir>[\w\-]+)(\.git)(/)?",
    )
    .unwrap()
});

static REV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_./\-]+$").unwrap());

/// Parts of a repository URL relevant to installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    /// User from `user@host` style URLs.
    pub user: Option<String>,
    /// Host (or first path component for local paths).
    pub host: String,
    /// Repository directory name, without `.git`.
    pub dir: String,
}

/// Parse a repository URL. The URL must end in `<name>.git`.
pub fn parse_repo_url(url: &str) -> Option<RepoUrl> {
    let caps = REPO_URL_REGEX.captures(url)?;
    Some(RepoUrl {
        user: caps
            .name("user")
            .map(|m| m.as_str().to_string())
            .filter(|u| !u.is_empty()),
        host: caps.name("host")?.as_str().to_string(),
        dir: caps.name("dir")?.as_str().to_string(),
    })
}

/// Whether `rev` is an acceptable tree-ish for `git checkout`.
pub fn is_valid_rev(rev: &str) -> bool {
    !rev.starts_with('-') && REV_REGEX.is_match(rev)
}

/// Installs and updates template repositories.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    /// Registry root that repositories are cloned into.
    template_dir: PathBuf,
}

impl GitFetcher {
    /// Create a fetcher for the given template directory.
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    /// Get the template directory.
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Where the repository at `url` would be installed.
    pub fn destination(&self, url: &str) -> Result<PathBuf> {
        let parsed = parse_repo_url(url).ok_or_else(|| ScriptoriumError::InvalidRepositoryUrl {
            url: url.to_string(),
        })?;
        Ok(self.template_dir.join(parsed.dir))
    }

    /// Clone the repository at `url`, optionally checking out `rev`.
    ///
    /// Returns the path of the new clone.
    pub fn install(&self, url: &str, rev: Option<&str>) -> Result<PathBuf> {
        let dest = self.destination(url)?;
        if dest.exists() {
            return Err(ScriptoriumError::DestinationExists { path: dest });
        }
        if let Some(rev) = rev {
            check_rev(rev)?;
        }

        std::fs::create_dir_all(&self.template_dir)?;
        tracing::debug!(url, dest = %dest.display(), "Cloning template repository");
        git(&["clone", url, &dest.to_string_lossy()], None)?;

        if let Some(rev) = rev {
            git(&["checkout", rev], Some(&dest))?;
        }

        Ok(dest)
    }

    /// Update the installed template or repository called `name`.
    ///
    /// Fetches `origin`, then checks out `rev` if given or fast-forwards the
    /// current branch otherwise. Returns the updated directory.
    pub fn update(&self, name: &str, rev: Option<&str>) -> Result<PathBuf> {
        if let Some(rev) = rev {
            check_rev(rev)?;
        }

        let dir = self.locate(name)?;
        tracing::debug!(name, dir = %dir.display(), "Updating template repository");

        git(&["fetch", "origin"], Some(&dir))?;
        match rev {
            Some(rev) => git(&["checkout", rev], Some(&dir))?,
            None => git(&["merge", "--ff-only", "@{upstream}"], Some(&dir))?,
        };

        Ok(dir)
    }

    /// A template directory by name, or a repository directory directly
    /// under the template root.
    fn locate(&self, name: &str) -> Result<PathBuf> {
        let registry = TemplateRegistry::new(&self.template_dir);
        if let Some(template) = registry.try_find(name)? {
            return Ok(template.path);
        }

        let dir = self.template_dir.join(name);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(ScriptoriumError::TemplateNotInstalled {
                name: name.to_string(),
            })
        }
    }
}

fn check_rev(rev: &str) -> Result<()> {
    if is_valid_rev(rev) {
        Ok(())
    } else {
        Err(anyhow!("'{}' is not a valid revision", rev).into())
    }
}

/// Run git, returning stdout or failing with its stderr.
fn git(args: &[&str], cwd: Option<&Path>) -> anyhow::Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args).stdin(Stdio::null());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output()?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
