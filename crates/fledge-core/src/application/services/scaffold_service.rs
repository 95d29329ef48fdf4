//! Scaffold Service - main application orchestrator.
//!
//! This service drives one `init` run through its phases:
//! 1. Prepare the destination (create it, insist it is an empty directory)
//! 2. Stage every generator's output into a changeset
//! 3. Flush the changeset to disk, never overwriting
//! 4. Run the external commands: git init (optional), install, fix
//!
//! Each phase starts only if the previous one succeeded. Nothing is rolled
//! back: a failed run leaves whatever was already written.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        CommandSet, GitMode, Step,
        ports::{CommandRunner, Filesystem},
    },
    domain::{Changeset, CommandKind, FailureReason, Outcome, Project, chain_async},
    error::FledgeResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn CommandRunner>,
    commands: CommandSet,
    git_mode: GitMode,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use fledge_core::prelude::*;
    ///
    /// # fn demo(filesystem: Arc<dyn Filesystem>, runner: Arc<dyn CommandRunner>) {
    /// let service = ScaffoldService::new(filesystem, runner, CommandSet::default(), GitMode::Skeleton);
    /// # }
    /// ```
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn CommandRunner>,
        commands: CommandSet,
        git_mode: GitMode,
    ) -> Self {
        Self {
            filesystem,
            runner,
            commands,
            git_mode,
        }
    }

    pub fn git_mode(&self) -> GitMode {
        self.git_mode
    }

    /// Scaffold a new project.
    ///
    /// `Ok(Err(reason))` is an expected failure; `Err(_)` is fatal.
    #[instrument(skip_all, fields(path = %project.path.display(), target = %project.target))]
    pub async fn init(&self, project: &Project, pipeline: &Step) -> FledgeResult<Outcome<()>> {
        let root = project.path.as_path();

        let prepared = self.prepare_destination(root).await?;
        let staged = chain_async(prepared, |()| pipeline.run(Changeset::empty())).await?;
        let flushed = chain_async(staged, |changeset| self.flush(root, changeset)).await?;

        let initialised = match self.git_mode {
            GitMode::Command => {
                chain_async(flushed, |()| self.run_command(CommandKind::GitInit, root)).await?
            }
            GitMode::Skeleton => flushed,
        };
        let installed =
            chain_async(initialised, |()| self.run_command(CommandKind::Install, root)).await?;
        let fixed = chain_async(installed, |()| self.run_command(CommandKind::Fix, root)).await?;

        match &fixed {
            Ok(()) => info!("Scaffold completed successfully"),
            Err(reason) => warn!(%reason, "Scaffold stopped"),
        }
        Ok(fixed)
    }

    /// Create `root` if needed and require it to be an empty directory.
    pub async fn prepare_destination(&self, root: &Path) -> FledgeResult<Outcome<()>> {
        if let Err(reason) = self.filesystem.create_dir_all(root).await? {
            return Ok(Err(reason));
        }
        if !self.filesystem.is_empty_dir(root).await? {
            debug!("destination has entries");
            return Ok(Err(FailureReason::NotEmpty));
        }
        Ok(Ok(()))
    }

    /// Write every entry below `root`, in path order.
    ///
    /// Anything already on disk at a staged path stops the flush with
    /// `NotEmpty`; entries written before that stay written.
    #[instrument(skip_all, fields(entries = changeset.len()))]
    pub async fn flush(&self, root: &Path, changeset: Changeset) -> FledgeResult<Outcome<()>> {
        for (path, content) in changeset.iter() {
            let native = path.to_native(root);
            let written = match content.to_bytes()? {
                None => self.filesystem.create_dir_all(&native).await?,
                Some(bytes) => {
                    let parent = match native.parent() {
                        Some(parent) => self.filesystem.create_dir_all(parent).await?,
                        None => Ok(()),
                    };
                    match parent {
                        Ok(()) => self.filesystem.create_new(&native, &bytes).await?,
                        Err(reason) => Err(reason),
                    }
                }
            };

            if let Err(reason) = written {
                warn!(%path, %reason, "flush collided with existing content");
                return Ok(Err(FailureReason::NotEmpty));
            }
            debug!(%path, "written");
        }
        info!("Flushed staged files");
        Ok(Ok(()))
    }

    /// Run one configured command in `root`.
    pub async fn run_command(&self, kind: CommandKind, root: &Path) -> FledgeResult<Outcome<()>> {
        let spec = self.commands.get(kind);
        info!(command = %spec, phase = %kind, "Running command");

        let exit = self.runner.run(spec, root).await?;
        if exit.success() {
            Ok(Ok(()))
        } else {
            warn!(code = ?exit.code, phase = %kind, "Command failed");
            Ok(Err(FailureReason::ExternalCommandFailed(kind)))
        }
    }
}
