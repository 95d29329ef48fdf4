//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod inspect;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::error::{CliError, CliResult};

/// Absolute form of a directory argument, defaulting to the current
/// directory.
fn resolve_directory(directory: Option<&Path>) -> CliResult<PathBuf> {
    let path = directory.unwrap_or(Path::new("."));
    std::path::absolute(path).map_err(|e| CliError::bad_destination(path, e))
}

/// The current date in UTC. Copyright years and supported Node.js lines
/// follow it, independent of the machine's time zone.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directory_is_absolute() {
        let resolved = resolve_directory(None).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.file_name().is_some());
    }

    #[test]
    fn relative_directory_is_made_absolute() {
        let resolved = resolve_directory(Some(Path::new("my-lib"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("my-lib"));
    }

    #[test]
    fn today_is_the_utc_date() {
        let before = Utc::now().date_naive();
        let day = today();
        let after = Utc::now().date_naive();
        assert!(before <= day && day <= after);
    }
}
