//! Application layer for Fledge.
//!
//! This layer contains:
//! - **Steps**: Composable staging steps and their combinators
//! - **Generators**: The steps that produce a project's files
//! - **Services**: Use case orchestration (ScaffoldService, ProjectService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules (collision detection, manifest fields, ignore filtering)
//! live in `crate::domain`; this layer wires them to templates and I/O.

pub mod commands;
pub mod error;
pub mod generators;
pub mod ports;
pub mod services;
pub mod steps;

pub use commands::{CommandExit, CommandSet, CommandSpec, GitMode};
pub use error::ApplicationError;
pub use ports::{AuthorSource, CommandRunner, Filesystem, TemplateProvider};
pub use services::{ProjectService, ScaffoldService};
pub use steps::{Step, StepResult, chain_steps, join_steps};
