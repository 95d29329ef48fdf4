//! Templates read from a directory on disk.
//!
//! Lets users replace the built-in template set without rebuilding. The
//! directory must mirror the embedded layout (`gitignore`, `idea/...`,
//! `git/HEAD`, ...).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use fledge_core::{
    application::{ApplicationError, ports::TemplateProvider},
    error::{FledgeError, FledgeResult},
};

/// Template provider backed by a directory.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl TemplateProvider for DirectoryTemplates {
    async fn read_template(&self, name: &str) -> FledgeResult<Vec<u8>> {
        let path = self.resolve(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into())
            }
            Err(e) => Err(ApplicationError::FilesystemError {
                path,
                reason: format!("Failed to read template: {e}"),
            }
            .into()),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn list_template_tree(&self, dir: &str) -> FledgeResult<Vec<String>> {
        let base = self.resolve(dir);
        if !base.is_dir() {
            debug!("template directory missing");
            return Ok(Vec::new());
        }

        let mut listed = Vec::new();
        for entry in WalkDir::new(&base).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| FledgeError::from(ApplicationError::FilesystemError {
                path: base.clone(),
                reason: e.to_string(),
            }))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let segments: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            listed.push(segments.join("/"));
        }
        listed.sort();
        Ok(listed)
    }
}
