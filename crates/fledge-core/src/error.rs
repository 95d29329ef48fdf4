//! Unified error handling for Fledge Core.
//!
//! Everything in here is *fatal*: I/O failures unrelated to existence
//! checks, malformed packaged templates, process spawn failures. Expected
//! conditions (collisions, non-zero command exits) are never errors; they
//! travel as [`crate::domain::FailureReason`] inside an `Outcome`.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Fledge Core operations.
#[derive(Debug, Error, Clone)]
pub enum FledgeError {
    /// Errors from the domain layer (invalid names, paths, documents).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (templates, filesystem, processes).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FledgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Fledge".into(),
                "Please report this issue at: https://github.com/fledge-rs/fledge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FledgeResult<T> = Result<T, FledgeError>;

/// Extension trait for adding context to foreign errors.
pub trait Context<T> {
    /// Add context to an error, turning it into [`FledgeError::Internal`].
    fn context(self, msg: impl Into<String>) -> FledgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> FledgeResult<T> {
        self.map_err(|e| FledgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_category() {
        let err: FledgeError = DomainError::InvalidPackageName {
            name: "Bad Name".into(),
            reason: "contains spaces".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_as_internal() {
        let parsed: Result<i32, _> = "x".parse::<i32>();
        let err = parsed.context("parsing year").unwrap_err();
        assert!(matches!(err, FledgeError::Internal { .. }));
        assert!(err.to_string().contains("parsing year"));
    }
}
