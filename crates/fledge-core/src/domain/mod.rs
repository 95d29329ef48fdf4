//! Domain layer: pure logic with no I/O.
//!
//! Everything here is synchronous and deterministic. The application layer
//! feeds it template bytes and hands the results to ports.

pub mod changeset;
pub mod copyright;
pub mod error;
pub mod git_host;
pub mod ignore;
pub mod manifest;
pub mod node;
pub mod outcome;
pub mod path;
pub mod project;
pub mod spdx;
pub mod xml;

pub use changeset::{Changeset, FileContent};
pub use copyright::CopyrightHolders;
pub use error::DomainError;
pub use git_host::GitHost;
pub use ignore::filter_ignore;
pub use manifest::{OptionalField, TargetProfile, apply_target_profile, compute_manifest};
pub use node::NodeVersions;
pub use outcome::{CommandKind, FailureReason, Outcome, all, chain_async};
pub use path::RelativePath;
pub use project::{Author, License, NpmPackage, Project, ProjectOptions, TargetKind};
pub use xml::XmlElement;
