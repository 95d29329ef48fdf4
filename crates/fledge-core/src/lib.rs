//! Fledge Core - staged changeset engine for project scaffolding.
//!
//! This crate provides the domain and application layers for the Fledge
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           fledge-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, ProjectService)     │
//! │   Steps + Generators build a Changeset  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Templates, Filesystem, CommandRunner)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    fledge-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │   (Outcome, Changeset, Project, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fledge_core::prelude::*;
//!
//! # async fn demo(service: ScaffoldService, project: Project, pipeline: Step) -> FledgeResult<()> {
//! match service.init(&project, &pipeline).await? {
//!     Ok(()) => println!("done"),
//!     Err(reason) => eprintln!("{reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandExit, CommandSet, CommandSpec, GitMode, ProjectService, ScaffoldService, Step,
        chain_steps, join_steps,
        generators::standard_pipeline,
        ports::{AuthorSource, CommandRunner, Filesystem, TemplateProvider},
    };
    pub use crate::domain::{
        Changeset, CommandKind, CopyrightHolders, FailureReason, FileContent, GitHost, Outcome,
        Project, ProjectOptions, RelativePath, TargetKind,
    };
    pub use crate::error::{FledgeError, FledgeResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
