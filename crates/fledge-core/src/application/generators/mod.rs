//! Generators: the steps that stage a new project's files.
//!
//! Every generator is a [`Step`] and routes each file through
//! [`Changeset::insert`](crate::domain::Changeset::insert). Building a
//! generator can fail fatally (a fixed destination path that does not
//! parse); running one can fail fatally on template problems or with
//! `NotEmpty` on a collision.

pub mod files;
pub mod git;
pub mod idea;
pub mod ignore_files;
pub mod npm;
pub mod templates;

pub use templates::Templates;

use crate::application::{GitMode, Step, chain_steps};
use crate::domain::Project;
use crate::error::FledgeResult;

/// Everything `fledge init` stages, in order.
///
/// With [`GitMode::Command`] the repository is created by a command after
/// flushing instead of being staged here.
pub fn standard_pipeline(
    templates: &Templates,
    project: &Project,
    git_mode: GitMode,
) -> FledgeResult<Step> {
    let mut steps = vec![
        files::write_static_files(templates, project)?,
        ignore_files::write_ignore_files(templates, project)?,
        npm::write_npm_files(templates, project)?,
        files::write_webpack_config(templates, project)?,
        idea::write_idea_files(templates, project)?,
    ];
    if git_mode == GitMode::Skeleton {
        steps.push(git::write_git_skeleton(templates)?);
    }
    Ok(chain_steps(steps))
}


#[cfg(test)]
mod tests {
    use super::testing::{StubTemplates, project};
    use super::*;
    use crate::domain::{Changeset, RelativePath, TargetKind};

    async fn staged_paths(target: TargetKind, git_mode: GitMode) -> Vec<String> {
        let templates = StubTemplates::standard().shared();
        standard_pipeline(&templates, &project(target), git_mode)
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap()
            .paths()
            .map(RelativePath::to_string)
            .collect()
    }

    #[tokio::test]
    async fn library_pipeline_stages_everything() {
        let paths = staged_paths(TargetKind::Npm, GitMode::Skeleton).await;
        for expected in [
            ".github/workflows/ci.yml",
            ".gitignore",
            ".npmignore",
            ".prettierignore",
            ".idea/widget.iml",
            ".git/HEAD",
            "package.json",
            "index.ts",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
        assert!(!paths.iter().any(|p| p == "webpack.config.js"));
    }

    #[tokio::test]
    async fn webapp_pipeline_swaps_target_files() {
        let paths = staged_paths(TargetKind::Webapp, GitMode::Skeleton).await;
        assert!(paths.iter().any(|p| p == "webpack.config.js"));
        assert!(!paths.iter().any(|p| p == ".npmignore"));
    }

    #[tokio::test]
    async fn command_git_mode_stages_no_git_dir() {
        let paths = staged_paths(TargetKind::Npm, GitMode::Command).await;
        assert!(!paths.iter().any(|p| p.starts_with(".git/")));
    }
}
