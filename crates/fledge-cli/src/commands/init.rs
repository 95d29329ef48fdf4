//! `fledge init`: create a new project.
//!
//! Responsibility: translate CLI arguments and configuration into a
//! `Project`, build the generator pipeline, wire the adapters into
//! `ScaffoldService`, and report the outcome. No business logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use fledge_adapters::{
    DirectoryTemplates, EmbeddedTemplates, GitConfigAuthor, LocalFilesystem, ProcessRunner,
};
use fledge_core::{
    application::generators::Templates,
    domain::Author,
    prelude::*,
};

use super::{resolve_directory, today};
use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `fledge init`.
///
/// 1. Resolve the destination and the project descriptor
/// 2. Build the pipeline for the configured git mode
/// 3. Run it: prepare, stage, flush, external commands
/// 4. Map a failed run to [`CliError::Scaffold`]
#[instrument(skip_all)]
pub async fn execute(
    args: InitArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let destination = resolve_directory(args.destination.as_deref())?;
    let options = project_options(args, destination, &config);

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let projects = ProjectService::new(
        filesystem.clone(),
        Arc::new(GitConfigAuthor::new()),
        config.copyright_holders(),
    );
    let project = projects.create(options, today()).await?;
    debug!(
        package = %project.npm_package.full_name(),
        target = %project.target,
        git_host = ?project.git_host,
        "Project resolved"
    );

    let templates = templates(&config);
    let pipeline = standard_pipeline(&templates, &project, config.git.mode)?;
    let service = ScaffoldService::new(
        filesystem,
        Arc::new(ProcessRunner::new().quiet(global.quiet)),
        config.commands,
        config.git.mode,
    );

    output.header(&format!(
        "Creating {} in {}",
        project.npm_package.full_name(),
        project.path.display()
    ))?;
    info!(path = %project.path.display(), "Scaffold started");

    service
        .init(&project, &pipeline)
        .await?
        .map_err(CliError::Scaffold)?;

    info!("Scaffold completed");
    output.success(&format!("Created {}", project.npm_package.full_name()))?;
    output.info(&format!("Next: cd {}", project.path.display()))?;
    Ok(())
}

fn project_options(args: InitArgs, path: PathBuf, config: &AppConfig) -> ProjectOptions {
    ProjectOptions {
        path,
        scope: args
            .scope
            .map(|scope| scope.trim_start_matches('@').to_string()),
        name: args.name,
        github_owner: args.github_owner,
        github_project: args.github_project,
        default_github_owner: config.project.github_owner.clone(),
        target: Some(if args.webapp {
            TargetKind::Webapp
        } else {
            TargetKind::Npm
        }),
        author: Author {
            name: args.author_name,
            email: args.author_email,
        },
        spdx_license: args.license,
        copyright_holder: args.copyright_holder,
    }
}

fn templates(config: &AppConfig) -> Templates {
    match &config.templates.directory {
        Some(directory) => {
            debug!(directory = %directory.display(), "Using template directory");
            Arc::new(DirectoryTemplates::new(directory))
        }
        None => Arc::new(EmbeddedTemplates::new()),
    }
}
