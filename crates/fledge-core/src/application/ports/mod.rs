//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fledge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateProvider`: Packaged template files
//!   - `Filesystem`: Destination directory operations
//!   - `CommandRunner`: External programs (install, fix, git init)
//!   - `AuthorSource`: Fallback author identity
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{AuthorSource, CommandRunner, Filesystem, TemplateProvider};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockTemplateProvider};
