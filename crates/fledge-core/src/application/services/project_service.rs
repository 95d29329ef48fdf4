//! Project Service - builds the descriptor generators consume.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{AuthorSource, Filesystem},
    },
    domain::{CopyrightHolders, Project, ProjectOptions},
    error::FledgeResult,
};

/// Creates fresh project descriptors and reads existing ones back.
pub struct ProjectService {
    filesystem: Arc<dyn Filesystem>,
    author_source: Arc<dyn AuthorSource>,
    holders: CopyrightHolders,
}

impl ProjectService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        author_source: Arc<dyn AuthorSource>,
        holders: CopyrightHolders,
    ) -> Self {
        Self {
            filesystem,
            author_source,
            holders,
        }
    }

    /// Descriptor for a project about to be created.
    ///
    /// Author name and email not given in `options` are taken from the
    /// author source when it knows them.
    #[instrument(skip_all, fields(path = %options.path.display()))]
    pub async fn create(
        &self,
        mut options: ProjectOptions,
        today: NaiveDate,
    ) -> FledgeResult<Project> {
        if options.author.name.is_none() {
            options.author.name = self.author_source.name().await;
        }
        if options.author.email.is_none() {
            options.author.email = self.author_source.email().await;
        }
        debug!(author = ?options.author, "resolved author");

        Ok(Project::create(options, today, &self.holders)?)
    }

    /// Descriptor for an existing project in `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn read(&self, path: &Path, today: NaiveDate) -> FledgeResult<Project> {
        let manifest_path = path.join("package.json");
        let text = self
            .filesystem
            .read_to_string(&manifest_path)
            .await?
            .ok_or_else(|| ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            })?;
        let manifest: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ApplicationError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let webapp = self
            .filesystem
            .is_file(&path.join("webpack.config.js"))
            .await?;

        Ok(Project::from_manifest(
            path.to_path_buf(),
            &manifest,
            webapp,
            today,
            &self.holders,
        )?)
    }
}
