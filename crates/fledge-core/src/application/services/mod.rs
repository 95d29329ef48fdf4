//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "read a project back".

pub mod project_service;
pub mod scaffold_service;

pub use project_service::ProjectService;
pub use scaffold_service::ScaffoldService;
