// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// These are fatal: a domain error means the input can never produce a
/// valid project, so the whole operation stops before touching the disk.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid relative path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Invalid package scope '{scope}': {reason}")]
    InvalidScope { scope: String, reason: String },

    #[error("Cannot derive a package name from '{path}'")]
    UnnamedDestination { path: String },

    #[error("Invalid license expression '{expression}': {reason}")]
    InvalidLicense { expression: String, reason: String },

    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Document '{document}' is not valid: {reason}")]
    InvalidDocument { document: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackageName { name, .. } => vec![
                format!("'{}' cannot be used as a package name", name),
                "Package names are lowercase and URL-safe: my-project, my_lib, lib2".into(),
                "Pass an explicit name with --name".into(),
            ],
            Self::InvalidScope { scope, .. } => vec![
                format!("'{}' cannot be used as a package scope", scope),
                "Pass the scope without the leading '@': --scope my-org".into(),
            ],
            Self::UnnamedDestination { .. } => vec![
                "The destination has no final path component to name the package after".into(),
                "Pass an explicit name with --name".into(),
            ],
            Self::InvalidLicense { .. } => vec![
                "Use an SPDX identifier such as MIT or ISC".into(),
                "Combine identifiers with AND, OR and WITH: --license \"MIT OR Apache-2.0\"".into(),
            ],
            Self::InvalidDocument { document, .. } => vec![
                format!("The packaged template '{}' is corrupted", document),
                "Please report this issue or point FLEDGE_TEMPLATES__DIRECTORY elsewhere".into(),
            ],
            Self::InvalidPath { .. } => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackageName { .. }
            | Self::InvalidScope { .. }
            | Self::UnnamedDestination { .. }
            | Self::InvalidLicense { .. } => ErrorCategory::Validation,
            Self::InvalidPath { .. } | Self::InvalidDocument { .. } => ErrorCategory::Internal,
        }
    }
}
