//! Local filesystem adapter using tokio::fs.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use fledge_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FailureReason, Outcome},
    error::{FledgeError, FledgeResult},
};

/// Production filesystem implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn create_dir_all(&self, path: &Path) -> FledgeResult<Outcome<()>> {
        match tokio::fs::create_dir_all(path).await {
            Ok(()) => Ok(Ok(())),
            Err(e) if matches!(e.kind(), ErrorKind::AlreadyExists | ErrorKind::NotADirectory) => {
                Ok(Err(FailureReason::NotDirectory))
            }
            Err(e) => Err(map_io_error(path, e, "create directory")),
        }
    }

    async fn is_empty_dir(&self, path: &Path) -> FledgeResult<bool> {
        let mut pending: Vec<PathBuf> = vec![path.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| map_io_error(&dir, e, "read directory"))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| map_io_error(&dir, e, "read directory"))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    async fn create_new(&self, path: &Path, contents: &[u8]) -> FledgeResult<Outcome<()>> {
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;

        let mut file = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Ok(Err(FailureReason::NotEmpty));
            }
            Err(e) => return Err(map_io_error(path, e, "create file")),
        };

        file.write_all(contents)
            .await
            .map_err(|e| map_io_error(path, e, "write file"))?;
        file.flush()
            .await
            .map_err(|e| map_io_error(path, e, "write file"))?;
        Ok(Ok(()))
    }

    async fn read_to_string(&self, path: &Path) -> FledgeResult<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    async fn is_file(&self, path: &Path) -> FledgeResult<bool> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io_error(path, e, "inspect file")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FledgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b");
        let fs = LocalFilesystem::new();

        assert_eq!(fs.create_dir_all(&dir).await.unwrap(), Ok(()));
        assert_eq!(fs.create_dir_all(&dir).await.unwrap(), Ok(()));
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn file_in_the_way_is_not_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("taken");
        std::fs::write(&file, "x").unwrap();
        let fs = LocalFilesystem::new();

        assert_eq!(
            fs.create_dir_all(&file).await.unwrap(),
            Err(FailureReason::NotDirectory)
        );
    }

    #[tokio::test]
    async fn create_new_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("package.json");
        let fs = LocalFilesystem::new();

        assert_eq!(fs.create_new(&file, b"first").await.unwrap(), Ok(()));
        assert_eq!(
            fs.create_new(&file, b"second").await.unwrap(),
            Err(FailureReason::NotEmpty)
        );
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "first");
    }

    #[tokio::test]
    async fn nested_empty_directories_count_as_empty() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("x").join("y")).unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.is_empty_dir(temp.path()).await.unwrap());

        std::fs::write(temp.path().join("x").join("y").join("f"), "").unwrap();
        assert!(!fs.is_empty_dir(temp.path()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert_eq!(
            fs.read_to_string(&temp.path().join("nope")).await.unwrap(),
            None
        );
        assert!(!fs.is_file(&temp.path().join("nope")).await.unwrap());
    }
}
