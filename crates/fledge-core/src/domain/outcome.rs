//! The outcome vocabulary shared by every stage of a scaffolding run.
//!
//! An [`Outcome`] is an ordinary `Result` whose error side is a small,
//! enumerated [`FailureReason`]. Expected conditions travel through it;
//! fatal errors live one layer further out as [`crate::error::FledgeError`],
//! which is why pipeline functions return `FledgeResult<Outcome<T>>`.
//!
//! `map` needs no helper: it is `Result::map`.

use std::fmt;
use std::future::Future;

use thiserror::Error;

/// Which external command phase produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Dependency installation.
    Install,
    /// Code-style auto-fix.
    Fix,
    /// `git init` in the destination.
    GitInit,
}

impl CommandKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Fix => "fix",
            Self::GitInit => "git-init",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only expected ways a scaffolding run can fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    #[error("Target exists and is not a directory")]
    NotDirectory,

    #[error("Directory not empty")]
    NotEmpty,

    #[error("{}", command_failure_message(.0))]
    ExternalCommandFailed(CommandKind),
}

impl FailureReason {
    pub const INSTALL_FAILED: Self = Self::ExternalCommandFailed(CommandKind::Install);
    pub const FIX_FAILED: Self = Self::ExternalCommandFailed(CommandKind::Fix);
    pub const GIT_INIT_FAILED: Self = Self::ExternalCommandFailed(CommandKind::GitInit);
}

fn command_failure_message(kind: &CommandKind) -> &'static str {
    match kind {
        CommandKind::Install => "Dependency installation failed",
        CommandKind::Fix => "Failed to apply code style rules",
        CommandKind::GitInit => "Git repository initialisation failed",
    }
}

/// Result of an operation that may fail for an expected reason.
pub type Outcome<T> = Result<T, FailureReason>;

/// Short-circuit primitive every pipeline is built from.
///
/// On success the continuation runs and its result is returned as-is; on
/// failure the continuation is never invoked and the failure passes through.
/// The outer `Result` carries fatal errors from the continuation.
pub async fn chain_async<T, U, E, X, F, Fut>(
    outcome: Result<T, E>,
    f: F,
) -> Result<Result<U, E>, X>
where
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<Result<U, E>, X>>,
{
    match outcome {
        Ok(value) => f(value).await,
        Err(reason) => Ok(Err(reason)),
    }
}

/// Collect already-resolved outcomes.
///
/// Succeeds with every value, in order, only if every element succeeded;
/// otherwise yields the first failure encountered, scanning left to right.
pub fn all<T, E>(outcomes: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, E> {
    let outcomes = outcomes.into_iter();
    let mut values = Vec::with_capacity(outcomes.size_hint().0);
    for outcome in outcomes {
        values.push(outcome?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn map_applies_only_on_success() {
        let ok: Outcome<u32> = Ok(2);
        assert_eq!(ok.map(|v| v * 10), Ok(20));

        let failed: Outcome<u32> = Err(FailureReason::NotEmpty);
        assert_eq!(failed.map(|v| v * 10), Err(FailureReason::NotEmpty));
    }

    #[tokio::test]
    async fn chain_async_runs_continuation_on_success() {
        let result: Result<Outcome<String>, ()> =
            chain_async(Ok(3), |v| async move { Ok(Ok(format!("v{v}"))) }).await;
        assert_eq!(result, Ok(Ok("v3".to_string())));
    }

    #[tokio::test]
    async fn chain_async_skips_continuation_on_failure() {
        let called = Cell::new(false);
        let result: Result<Outcome<u32>, ()> =
            chain_async(Err(FailureReason::NotDirectory), |v: u32| {
                called.set(true);
                async move { Ok(Ok(v)) }
            })
            .await;

        assert_eq!(result, Ok(Err(FailureReason::NotDirectory)));
        assert!(!called.get());
    }

    #[test]
    fn all_succeeds_when_every_element_succeeds() {
        let outcomes: Vec<Outcome<u8>> = vec![Ok(1), Ok(2), Ok(3)];
        assert_eq!(all(outcomes), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn all_reports_first_failure_left_to_right() {
        let outcomes: Vec<Outcome<u8>> = vec![
            Ok(1),
            Err(FailureReason::INSTALL_FAILED),
            Err(FailureReason::NotEmpty),
        ];
        assert_eq!(all(outcomes), Err(FailureReason::INSTALL_FAILED));
    }

    #[test]
    fn all_of_nothing_is_success() {
        let outcomes: Vec<Outcome<u8>> = vec![];
        assert_eq!(all(outcomes), Ok(vec![]));
    }

    #[test]
    fn failure_messages_are_one_line() {
        assert_eq!(FailureReason::NotEmpty.to_string(), "Directory not empty");
        assert_eq!(
            FailureReason::NotDirectory.to_string(),
            "Target exists and is not a directory"
        );
        assert_eq!(
            FailureReason::FIX_FAILED.to_string(),
            "Failed to apply code style rules"
        );
        assert_eq!(
            FailureReason::INSTALL_FAILED.to_string(),
            "Dependency installation failed"
        );
    }
}
