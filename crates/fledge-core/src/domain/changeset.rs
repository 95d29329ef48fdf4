use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::domain::{FailureReason, Outcome, RelativePath, xml::XmlElement};
use crate::error::{Context, FledgeResult};

/// Pending content for one path in a [`Changeset`].
///
/// Structured documents stay structured until the changeset is flushed.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Bytes(Vec<u8>),
    Text(String),
    Json(serde_json::Value),
    Xml(XmlElement),
    /// A directory that must exist even though nothing is written into it.
    EmptyDirectory,
}

impl FileContent {
    /// Serialize to the bytes that end up on disk.
    ///
    /// Returns `None` for [`FileContent::EmptyDirectory`].
    pub fn to_bytes(&self) -> FledgeResult<Option<Vec<u8>>> {
        let bytes = match self {
            Self::Bytes(bytes) => bytes.clone(),
            Self::Text(text) => text.clone().into_bytes(),
            Self::Json(value) => {
                let mut bytes =
                    serde_json::to_vec_pretty(value).context("serializing JSON document")?;
                bytes.push(b'\n');
                bytes
            }
            Self::Xml(element) => element.to_xml_string().into_bytes(),
            Self::EmptyDirectory => return Ok(None),
        };
        Ok(Some(bytes))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::EmptyDirectory)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for FileContent {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<XmlElement> for FileContent {
    fn from(element: XmlElement) -> Self {
        Self::Xml(element)
    }
}

/// Immutable staging area of pending file writes for one scaffolding run.
///
/// Every insert yields a new value and leaves other handles to the old one
/// untouched, so several candidate steps can work from the same snapshot.
/// Cloning is cheap. Storage is copied on write, and only while another
/// handle still shares it.
///
/// Invariant: paths are unique. Iteration is in path order.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    entries: Arc<BTreeMap<RelativePath, FileContent>>,
}

impl Changeset {
    /// A changeset with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stage one path.
    ///
    /// Fails with [`FailureReason::NotEmpty`] if the path is already staged.
    pub fn insert(self, path: RelativePath, content: impl Into<FileContent>) -> Outcome<Self> {
        self.insert_all([(path, content.into())])
    }

    /// Stage several paths at once.
    ///
    /// The first path that is already staged (either in `self` or earlier in
    /// `entries`) fails the whole batch with [`FailureReason::NotEmpty`]
    /// before anything is copied. An empty batch returns `self` unchanged.
    pub fn insert_all(
        mut self,
        entries: impl IntoIterator<Item = (RelativePath, FileContent)>,
    ) -> Outcome<Self> {
        let entries: Vec<_> = entries.into_iter().collect();
        if entries.is_empty() {
            return Ok(self);
        }

        {
            let mut batch = BTreeSet::new();
            for (path, _) in &entries {
                if self.entries.contains_key(path) || !batch.insert(path) {
                    tracing::debug!(path = %path, "path already staged");
                    return Err(FailureReason::NotEmpty);
                }
            }
        }

        Arc::make_mut(&mut self.entries).extend(entries);
        Ok(self)
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn get(&self, path: &RelativePath) -> Option<&FileContent> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &FileContent)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.keys()
    }

    /// Entries present here but not in `base`, in path order.
    pub fn additions_since<'a>(
        &'a self,
        base: &'a Changeset,
    ) -> impl Iterator<Item = (&'a RelativePath, &'a FileContent)> + 'a {
        self.entries
            .iter()
            .filter(move |(path, _)| !base.contains(path))
    }

    /// `true` if both handles share the same underlying storage.
    pub fn ptr_eq(&self, other: &Changeset) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl PartialEq for Changeset {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.entries == other.entries
    }
}
