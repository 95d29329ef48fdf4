//! Runs external programs with `tokio::process`.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use fledge_core::{
    application::{ApplicationError, CommandExit, CommandSpec, ports::CommandRunner},
    error::FledgeResult,
};

/// Production command runner.
///
/// Output is inherited from the parent unless `quiet` is set, in which case
/// stdout and stderr are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    quiet: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(command = %spec, dir = %working_dir.display()))]
    async fn run(&self, spec: &CommandSpec, working_dir: &Path) -> FledgeResult<CommandExit> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(working_dir)
            .stdin(Stdio::null());
        if self.quiet {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = command
            .status()
            .await
            .map_err(|e| ApplicationError::CommandSpawn {
                program: spec.program.clone(),
                reason: e.to_string(),
            })?;
        debug!(code = ?status.code(), "command exited");

        Ok(CommandExit {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use fledge_core::error::FledgeError;
    use tempfile::TempDir;

    fn spec(program: &str, args: &[&str]) -> CommandSpec {
        CommandSpec::new(program, args.iter().copied())
    }

    #[tokio::test]
    async fn reports_success() {
        let temp = TempDir::new().unwrap();
        let exit = ProcessRunner::new()
            .quiet(true)
            .run(&spec("true", &[]), temp.path())
            .await
            .unwrap();
        assert!(exit.success());
    }

    #[tokio::test]
    async fn reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let exit = ProcessRunner::new()
            .quiet(true)
            .run(&spec("sh", &["-c", "exit 3"]), temp.path())
            .await
            .unwrap();
        assert_eq!(exit.code, Some(3));
        assert!(!exit.success());
    }

    #[tokio::test]
    async fn runs_in_working_dir() {
        let temp = TempDir::new().unwrap();
        ProcessRunner::new()
            .quiet(true)
            .run(&spec("sh", &["-c", "echo hi > marker"]), temp.path())
            .await
            .unwrap();
        assert!(temp.path().join("marker").is_file());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let err = ProcessRunner::new()
            .run(&spec("fledge-no-such-program", &[]), temp.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FledgeError::Application(ApplicationError::CommandSpawn { .. })
        ));
    }
}
