use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::CommandKind;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The external commands run after flushing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    pub install: CommandSpec,
    pub fix: CommandSpec,
    pub git_init: CommandSpec,
}

impl CommandSet {
    pub fn get(&self, kind: CommandKind) -> &CommandSpec {
        match kind {
            CommandKind::Install => &self.install,
            CommandKind::Fix => &self.fix,
            CommandKind::GitInit => &self.git_init,
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            install: CommandSpec::new("yarn", ["install"]),
            fix: CommandSpec::new("yarn", ["fix"]),
            git_init: CommandSpec::new("git", ["init"]),
        }
    }
}

/// How the git repository gets created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitMode {
    /// Stage a minimal `.git` skeleton with the other files.
    #[default]
    Skeleton,
    /// Run the configured `git init` after flushing.
    Command,
}

/// How an external command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandExit {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandExit {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
