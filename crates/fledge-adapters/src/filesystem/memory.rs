//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;

use fledge_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FailureReason, Outcome},
    error::{FledgeError, FledgeResult},
};

/// In-memory filesystem for testing.
///
/// Cloning shares the same tree, so a test can keep a handle while the
/// service under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_directories(&mut self, path: &Path) -> Outcome<()> {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if self.files.contains_key(&current) {
                return Err(FailureReason::NotDirectory);
            }
        }
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.directories.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                let _ = inner.add_directories(parent);
            }
            inner
                .files
                .insert(path.to_path_buf(), contents.as_ref().to_vec());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Whether a directory exists at `path`.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> FledgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> FledgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn create_dir_all(&self, path: &Path) -> FledgeResult<Outcome<()>> {
        Ok(self.write()?.add_directories(path))
    }

    async fn is_empty_dir(&self, path: &Path) -> FledgeResult<bool> {
        let inner = self.read()?;
        Ok(!inner.files.keys().any(|file| file.starts_with(path)))
    }

    async fn create_new(&self, path: &Path, contents: &[u8]) -> FledgeResult<Outcome<()>> {
        let mut inner = self.write()?;

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Ok(Err(FailureReason::NotEmpty));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(Ok(()))
    }

    async fn read_to_string(&self, path: &Path) -> FledgeResult<Option<String>> {
        let inner = self.read()?;
        inner
            .files
            .get(path)
            .map(|bytes| {
                String::from_utf8(bytes.clone()).map_err(|e| {
                    FledgeError::from(ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })
                })
            })
            .transpose()
    }

    async fn is_file(&self, path: &Path) -> FledgeResult<bool> {
        Ok(self.read()?.files.contains_key(path))
    }
}

fn lock_error() -> FledgeError {
    FledgeError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directories_include_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/a/b")).await.unwrap().unwrap();
        assert!(fs.is_dir(Path::new("/p/a")));
        assert!(fs.is_dir(Path::new("/p/a/b")));
    }

    #[tokio::test]
    async fn file_blocks_directory_creation() {
        let fs = MemoryFilesystem::new().with_file("/p/file", "x");
        assert_eq!(
            fs.create_dir_all(Path::new("/p/file/sub")).await.unwrap(),
            Err(FailureReason::NotDirectory)
        );
    }

    #[tokio::test]
    async fn create_new_rejects_existing() {
        let fs = MemoryFilesystem::new().with_file("/p/a.txt", "old");
        assert_eq!(
            fs.create_new(Path::new("/p/a.txt"), b"new").await.unwrap(),
            Err(FailureReason::NotEmpty)
        );
        assert_eq!(fs.read_file(Path::new("/p/a.txt")), Some(b"old".to_vec()));
    }

    #[tokio::test]
    async fn create_new_needs_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.create_new(Path::new("/nowhere/a"), b"").await.is_err());
    }

    #[tokio::test]
    async fn emptiness_ignores_bare_directories() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/sub")).await.unwrap().unwrap();
        assert!(fs.is_empty_dir(Path::new("/p")).await.unwrap());

        let fs = fs.with_file("/p/sub/f", "");
        assert!(!fs.is_empty_dir(Path::new("/p")).await.unwrap());
    }
}
