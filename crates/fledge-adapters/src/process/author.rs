//! Author identity from the user's git configuration.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use fledge_core::application::ports::AuthorSource;

/// Reads `user.name` and `user.email` with `git config --get`.
///
/// Any failure (git missing, key unset, non-UTF-8 output) yields `None`.
#[derive(Debug, Clone, Default)]
pub struct GitConfigAuthor {
    program: Option<String>,
}

impl GitConfigAuthor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    async fn get(&self, key: &str) -> Option<String> {
        let program = self.program.as_deref().unwrap_or("git");
        let output = Command::new(program)
            .args(["config", "--get", key])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            debug!(key, "git config has no value");
            return None;
        }
        let value = String::from_utf8(output.stdout).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

#[async_trait]
impl AuthorSource for GitConfigAuthor {
    async fn name(&self) -> Option<String> {
        self.get("user.name").await
    }

    async fn email(&self) -> Option<String> {
        self.get("user.email").await
    }
}
