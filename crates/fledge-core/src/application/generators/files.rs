//! Verbatim template copies, plus the CI workflow.

use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};

use crate::application::{Step, join_steps};
use crate::domain::{FileContent, NodeVersions, Project, RelativePath, TargetKind};
use crate::error::FledgeResult;

use super::templates::{Templates, copy, dest, malformed, read_text};

const CI_WORKFLOW: &str = "github/workflows/ci.yml";

/// `(template, destination)` pairs shared by every target.
const COMMON: &[(&str, &str)] = &[
    ("eslintignore", ".eslintignore"),
    ("renovate.json", "renovate.json"),
    ("tsconfig.json", "tsconfig.json"),
    ("tsconfig.test.json", "tsconfig.test.json"),
];

const SOURCES: &[(&str, &str)] = &[("index.ts", "index.ts"), ("index.test.ts", "index.test.ts")];

/// Configuration files and source skeletons, copied concurrently, and the
/// CI workflow.
pub fn write_static_files(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    let mut steps = COMMON
        .iter()
        .chain(SOURCES)
        .map(|(source, target)| Ok(copy(templates, *source, dest(target)?)))
        .collect::<FledgeResult<Vec<_>>>()?;
    steps.push(write_ci_workflow(
        templates,
        project.node.clone(),
        dest(".github/workflows/ci.yml")?,
    ));
    Ok(join_steps(steps))
}

/// The CI workflow, testing on every supported Node.js line.
fn write_ci_workflow(templates: &Templates, node: NodeVersions, target: RelativePath) -> Step {
    let templates = Arc::clone(templates);
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let node = node.clone();
        let target = target.clone();
        async move {
            let workflow = read_text(templates.as_ref(), CI_WORKFLOW).await?;
            let rendered = set_node_matrix(&workflow, &node)
                .ok_or_else(|| malformed(CI_WORKFLOW, "no node-version matrix"))?;
            Ok(changeset.insert(target, FileContent::Text(rendered)))
        }
    })
}

/// Replace every `node-version: [...]` sequence, keeping indentation.
fn set_node_matrix(workflow: &str, node: &NodeVersions) -> Option<String> {
    static MATRIX: OnceLock<Regex> = OnceLock::new();
    let pattern = MATRIX.get_or_init(|| {
        Regex::new(r"(?m)^(\s*node-version:[ \t]*)\[[^\]\n]*\]")
            .expect("matrix pattern is valid")
    });

    if !pattern.is_match(workflow) {
        return None;
    }
    let matrix = node.ci_matrix();
    Some(
        pattern
            .replace_all(workflow, |caps: &Captures| format!("{}{matrix}", &caps[1]))
            .into_owned(),
    )
}

/// The bundler configuration, for webapps only.
pub fn write_webpack_config(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    Ok(match project.target {
        TargetKind::Webapp => copy(templates, "webpack.config.js", dest("webpack.config.js")?),
        TargetKind::Npm => Step::identity(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::testing::{StubTemplates, project};
    use crate::domain::{Changeset, FailureReason};

    #[tokio::test]
    async fn copies_configuration_and_sources() {
        let templates = StubTemplates::standard().shared();
        let staged = write_static_files(&templates, &project(TargetKind::Npm))
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();

        let paths: Vec<_> = staged.paths().map(RelativePath::as_str).collect();
        assert_eq!(
            paths,
            vec![
                ".eslintignore",
                ".github/workflows/ci.yml",
                "index.test.ts",
                "index.ts",
                "renovate.json",
                "tsconfig.json",
                "tsconfig.test.json",
            ]
        );
        assert_eq!(
            staged.get(&RelativePath::try_new("index.ts").unwrap()),
            Some(&FileContent::Bytes(b"export {};\n".to_vec()))
        );
        assert_eq!(
            staged.get(&RelativePath::try_new(".github/workflows/ci.yml").unwrap()),
            Some(&FileContent::Text(
                "name: CI\njobs:\n  test:\n    strategy:\n      matrix:\n        node-version: [20.x, 22.x, 24.x]\n".into()
            ))
        );
    }

    #[test]
    fn node_matrix_is_rewritten_in_place() {
        let node = NodeVersions::from_engines("^22 || >=24").unwrap();
        let workflow = "matrix:\n    node-version: [16.x, 18.x]\nsteps:\n  - with:\n      node-version: ${{ matrix.node-version }}\n";
        assert_eq!(
            set_node_matrix(workflow, &node).unwrap(),
            "matrix:\n    node-version: [22.x, 24.x]\nsteps:\n  - with:\n      node-version: ${{ matrix.node-version }}\n"
        );
    }

    #[test]
    fn workflow_without_matrix_is_rejected() {
        let node = NodeVersions::from_engines(">=24").unwrap();
        assert_eq!(set_node_matrix("name: CI\n", &node), None);
    }

    #[tokio::test]
    async fn missing_template_is_fatal() {
        let templates = StubTemplates::default().shared();
        let result = write_static_files(&templates, &project(TargetKind::Npm))
            .unwrap()
            .run(Changeset::empty())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn prestaged_destination_collides() {
        let templates = StubTemplates::standard().shared();
        let base = Changeset::empty()
            .insert(RelativePath::try_new("tsconfig.json").unwrap(), "{}")
            .unwrap();
        let result = write_static_files(&templates, &project(TargetKind::Npm))
            .unwrap()
            .run(base)
            .await
            .unwrap();
        assert_eq!(result, Err(FailureReason::NotEmpty));
    }

    #[tokio::test]
    async fn webpack_config_only_for_webapps() {
        let templates = StubTemplates::standard().shared();

        let npm = write_webpack_config(&templates, &project(TargetKind::Npm))
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();
        assert!(npm.is_empty());

        let webapp = write_webpack_config(&templates, &project(TargetKind::Webapp))
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();
        assert!(webapp.contains(&RelativePath::try_new("webpack.config.js").unwrap()));
    }
}
