//! Error types for Scriptorium operations.
//!
//! This module defines [`ScriptoriumError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ScriptoriumError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ScriptoriumError::Other`) for unexpected errors
//! - Every variant maps to a process exit code through [`ScriptoriumError::exit_code`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Scriptorium operations.
#[derive(Debug, Error)]
pub enum ScriptoriumError {
    /// Build target is neither a directory nor a file inside one.
    #[error("{path} is not a valid directory")]
    NotADirectory { path: PathBuf },

    /// No source file in the directory carries template metadata.
    #[error("{path} does not contain a file that appears to be the root of the paper")]
    NoRootDocument { path: PathBuf },

    /// The root document has no footer reference naming a template.
    #[error("Could not find footer indicating template name in {path}")]
    NoTemplateMetadata { path: PathBuf },

    /// Referenced template is not installed in the template directory.
    #[error("Template '{name}' is not installed")]
    TemplateNotInstalled { name: String },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed with exit code {code:?}")]
    ToolInvocationFailed {
        tool: String,
        code: Option<i32>,
        diagnostic: String,
    },

    /// An external tool did not finish before its deadline.
    #[error("{tool} did not finish within {seconds}s")]
    ToolTimedOut {
        tool: String,
        seconds: u64,
        diagnostic: String,
    },

    /// Destination already exists and overwriting was not requested.
    #[error("{path} already exists")]
    DestinationExists { path: PathBuf },

    /// The typesetting pass did not leave the expected auxiliary file.
    #[error("Auxiliary file not found: {path}")]
    AuxiliaryFileMissing { path: PathBuf },

    /// Neither bibliography engine matches the generated auxiliary data.
    #[error("Cannot tell whether bibtex or biber is required from {aux}")]
    BibliographyEngineUndetermined { aux: PathBuf },

    /// A template repository URL could not be parsed.
    #[error("{url} is not a valid git URL")]
    InvalidRepositoryUrl { url: String },

    /// Configuration key is not one of the recognised options.
    #[error("Unknown configuration key: {key}")]
    UnknownConfigKey { key: String },

    /// Configuration value failed validation.
    #[error("Invalid value for {key}: {message}")]
    InvalidConfigValue { key: String, message: String },

    /// Failed to parse a YAML file (configuration, manifest, defaults).
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScriptoriumError {
    /// Process exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoRootDocument { .. } => 1,
            Self::NoTemplateMetadata { .. } => 2,
            Self::TemplateNotInstalled { .. } => 4,
            Self::DestinationExists { .. } => 5,
            Self::ToolInvocationFailed { .. }
            | Self::ToolTimedOut { .. }
            | Self::AuxiliaryFileMissing { .. }
            | Self::BibliographyEngineUndetermined { .. } => 6,
            Self::NotADirectory { .. } => 7,
            Self::UnknownConfigKey { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigParseError { .. } => 8,
            Self::InvalidRepositoryUrl { .. } | Self::Io(_) | Self::Other(_) => 10,
        }
    }

    /// Captured tool output, when the error came from an external tool.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::ToolInvocationFailed { diagnostic, .. }
            | Self::ToolTimedOut { diagnostic, .. }
                if !diagnostic.is_empty() =>
            {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}

/// Exit code used when a scaffold leaves placeholders unresolved.
pub const EXIT_UNSET_VARIABLES: i32 = 3;

/// Result type alias for Scriptorium operations.
pub type Result<T> = std::result::Result<T, ScriptoriumError>;
