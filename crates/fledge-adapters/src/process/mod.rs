//! Child-process adapters.

mod author;
mod runner;

pub use author::GitConfigAuthor;
pub use runner::ProcessRunner;
