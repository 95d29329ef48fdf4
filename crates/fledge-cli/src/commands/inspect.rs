//! `fledge inspect`: read an existing project back.

use std::sync::Arc;

use fledge_adapters::{GitConfigAuthor, LocalFilesystem};
use fledge_core::{application::ProjectService, error::Context};

use super::{resolve_directory, today};
use crate::{cli::InspectArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Print the project descriptor as pretty JSON on stdout.
pub async fn execute(args: InspectArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let directory = resolve_directory(args.directory.as_deref())?;
    let service = ProjectService::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(GitConfigAuthor::new()),
        config.copyright_holders(),
    );

    let project = service.read(&directory, today()).await?;
    let json = serde_json::to_string_pretty(&project).context("serializing project")?;
    output.data(&json)?;
    Ok(())
}
