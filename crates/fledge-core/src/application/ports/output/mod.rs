//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fledge-adapters` crate provides implementations.
//!
//! Adapters translate platform error codes at this boundary: "already
//! exists" and "not a directory" come back as a [`FailureReason`] inside an
//! [`Outcome`], everything else as a fatal [`crate::error::FledgeError`].
//!
//! [`FailureReason`]: crate::domain::FailureReason

use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::application::{CommandExit, CommandSpec};
use crate::domain::Outcome;
use crate::error::FledgeResult;

/// Port for reading packaged templates.
///
/// Implemented by:
/// - `fledge_adapters::templates::EmbeddedTemplates` (compiled into the binary)
/// - `fledge_adapters::templates::DirectoryTemplates` (a directory on disk)
/// - `fledge_adapters::templates::MemoryTemplates` (testing)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    /// Raw bytes of one template, e.g. `gitignore` or `idea/misc.xml`.
    ///
    /// A missing template is `ApplicationError::TemplateNotFound`.
    async fn read_template(&self, name: &str) -> FledgeResult<Vec<u8>>;

    /// Every file below a template directory, relative to it, sorted.
    async fn list_template_tree(&self, dir: &str) -> FledgeResult<Vec<String>>;
}

/// Port for destination filesystem operations.
///
/// Implemented by:
/// - `fledge_adapters::filesystem::LocalFilesystem` (production)
/// - `fledge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parents. Idempotent.
    ///
    /// `Err(NotDirectory)` if the path or one of its ancestors is a file.
    async fn create_dir_all(&self, path: &Path) -> FledgeResult<Outcome<()>>;

    /// Whether an existing directory has no entries at any depth.
    async fn is_empty_dir(&self, path: &Path) -> FledgeResult<bool>;

    /// Create a file that must not exist yet.
    ///
    /// `Err(NotEmpty)` if something is already there; never overwrites.
    async fn create_new(&self, path: &Path, contents: &[u8]) -> FledgeResult<Outcome<()>>;

    /// File contents, or `None` if there is no such file.
    async fn read_to_string(&self, path: &Path) -> FledgeResult<Option<String>>;

    async fn is_file(&self, path: &Path) -> FledgeResult<bool>;
}

/// Port for running external programs.
///
/// Implemented by:
/// - `fledge_adapters::process::ProcessRunner` (tokio child processes)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion in `working_dir`.
    ///
    /// A non-zero exit is a normal [`CommandExit`]; failing to spawn the
    /// program at all is `ApplicationError::CommandSpawn`.
    async fn run(&self, spec: &CommandSpec, working_dir: &Path) -> FledgeResult<CommandExit>;
}

/// Port for the user's identity when none was given explicitly.
///
/// Implemented by:
/// - `fledge_adapters::process::GitConfigAuthor`
#[async_trait]
pub trait AuthorSource: Send + Sync {
    async fn name(&self) -> Option<String>;

    async fn email(&self) -> Option<String>;
}
