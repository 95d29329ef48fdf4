//! Infrastructure adapters for Fledge.
//!
//! This crate implements the ports defined in `fledge-core::application::ports`.
//! It contains all external dependencies and I/O operations: the
//! destination filesystem, the packaged templates and child processes.

pub mod filesystem;
pub mod process;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{GitConfigAuthor, ProcessRunner};
pub use templates::{DirectoryTemplates, EmbeddedTemplates, MemoryTemplates};
