//! Error handling for the Fledge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping
//!
//! A run that ends in a [`FailureReason`] is reported through
//! [`CliError::Scaffold`]; everything else is fatal.

use std::error::Error;
use std::path::Path;

use owo_colors::OwoColorize;
use thiserror::Error;

use fledge_core::domain::{CommandKind, FailureReason};
use fledge_core::error::{ErrorCategory as CoreCategory, FledgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scaffolding run failed for an expected reason.
    #[error("{0}")]
    Scaffold(FailureReason),

    /// Invalid user input.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `fledge-core` or an adapter.
    #[error("{0}")]
    Core(#[from] FledgeError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Scaffold(FailureReason::NotDirectory) => vec![
                "Choose a destination that is a directory or does not exist yet".into(),
            ],
            Self::Scaffold(FailureReason::NotEmpty) => vec![
                "Fledge only creates projects in empty directories".into(),
                "Choose a new directory name".into(),
            ],
            Self::Scaffold(FailureReason::ExternalCommandFailed(kind)) => {
                let mut suggestions = vec![
                    "The project files were written; check the command output above".into(),
                ];
                suggestions.push(match kind {
                    CommandKind::Install => "Retry with: yarn install".into(),
                    CommandKind::Fix => "Retry with: yarn fix".into(),
                    CommandKind::GitInit => "Retry with: git init".into(),
                });
                suggestions
            }

            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::Config { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Print the effective configuration with: fledge config show".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::Io { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Scaffold(_) => ErrorCategory::Failed,
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::NotFound => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Failed        |  1   |
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Configuration |  4   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Failed | ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        if let Self::Scaffold(reason) = self {
            output.push_str(&format!("{} {}\n", "✗".red().bold(), reason.red()));
            if verbose {
                for suggestion in self.suggestions() {
                    output.push_str(&format!("  {}\n", suggestion.dimmed()));
                }
            }
            return output;
        }

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    ///
    /// A failed run prints exactly one line, the reason.
    pub fn format_plain(&self, verbose: bool) -> String {
        if let Self::Scaffold(reason) = self {
            let mut out = format!("{reason}\n");
            if verbose {
                for s in self.suggestions() {
                    out.push_str(&format!("  {s}\n"));
                }
            }
            return out;
        }

        let mut out = format!("\nError: {}\n", self);

        if verbose {
            let mut src = Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Failed => tracing::info!("Run failed: {}", self),
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    /// Destination-related input error.
    pub fn bad_destination(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::InvalidInput {
            message: format!("cannot use '{}': {reason}", path.display()),
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The run ended in an expected failure.
    Failed,
    /// User input error (validation, invalid arguments, missing project).
    UserError,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fledge_core::application::ApplicationError;
    use fledge_core::domain::DomainError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn failure_reasons_exit_one() {
        for reason in [
            FailureReason::NotDirectory,
            FailureReason::NotEmpty,
            FailureReason::INSTALL_FAILED,
            FailureReason::FIX_FAILED,
            FailureReason::GIT_INIT_FAILED,
        ] {
            assert_eq!(CliError::Scaffold(reason).exit_code(), 1);
        }
    }

    #[test]
    fn failure_prints_one_line() {
        let out = CliError::Scaffold(FailureReason::NotEmpty).format_plain(false);
        assert_eq!(out, "Directory not empty\n");

        let out = CliError::Scaffold(FailureReason::FIX_FAILED).format_plain(false);
        assert_eq!(out, "Failed to apply code style rules\n");
    }

    #[test]
    fn invalid_package_name_is_user_error() {
        let err = CliError::from(FledgeError::from(DomainError::InvalidPackageName {
            name: "Widget".into(),
            reason: "uppercase".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_license_is_user_error() {
        let err = CliError::from(FledgeError::from(DomainError::InvalidLicense {
            expression: "MIT OR".into(),
            reason: "expression ends where a license identifier is expected".into(),
        }));
        assert_eq!(err.exit_code(), 2);
        assert!(err.format_plain(false).contains("MIT OR"));
    }

    #[test]
    fn missing_manifest_is_user_error() {
        let err = CliError::from(FledgeError::from(ApplicationError::ManifestNotFound {
            path: PathBuf::from("/tmp/x"),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn spawn_failure_is_configuration_error() {
        let err = CliError::from(FledgeError::from(ApplicationError::CommandSpawn {
            program: "yarn".into(),
            reason: "not found".into(),
        }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn config_error_exit_code() {
        let err = CliError::Config {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn io_error_is_internal() {
        let err = CliError::from(io::Error::other("e"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::InvalidInput {
            message: "bad".into(),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::InvalidInput {
            message: "bad".into(),
        };
        assert!(!err.format_plain(true).contains("--verbose"));
    }
}
