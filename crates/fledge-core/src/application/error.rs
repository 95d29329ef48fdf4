//! Application layer errors.
//!
//! Orchestration failures only: missing or broken packaged templates, I/O
//! that fails for reasons other than existence, processes that cannot be
//! started. Every one of these aborts the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A packaged template is missing.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A packaged template exists but cannot be used.
    #[error("Template '{name}' is malformed: {reason}")]
    MalformedTemplate { name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be started at all.
    #[error("Could not start '{program}': {reason}")]
    CommandSpawn { program: String, reason: String },

    /// No package manifest where a project was expected.
    #[error("No package.json found in {path}")]
    ManifestNotFound { path: PathBuf },

    /// The project's own manifest cannot be parsed.
    #[error("Invalid package.json in {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("Template '{}' is not available", name),
                "If you set a templates directory, check that it is complete".into(),
            ],
            Self::MalformedTemplate { .. } => vec![
                "The template set is corrupted or incompatible".into(),
                "Reinstall fledge or unset the templates directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandSpawn { program, .. } => vec![
                format!("Is '{}' installed and on your PATH?", program),
                "Configure a different command in the config file".into(),
                "Try: fledge config path".into(),
            ],
            Self::ManifestNotFound { .. } => vec![
                "Run this inside a project directory".into(),
                "Or pass the directory explicitly: fledge inspect <DIR>".into(),
            ],
            Self::InvalidManifest { .. } => vec!["Fix the JSON syntax in package.json".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ManifestNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::CommandSpawn { .. } => ErrorCategory::Configuration,
            Self::InvalidManifest { .. } => ErrorCategory::Validation,
            Self::MalformedTemplate { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
