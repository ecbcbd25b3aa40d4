//! Template installation from git repositories.

pub mod git;

pub use git::{is_valid_rev, parse_repo_url, GitFetcher, RepoUrl};
