use std::sync::Arc;

use crate::application::{Step, join_steps};
use crate::domain::{FileContent, Project, RelativePath, filter_ignore};
use crate::error::FledgeResult;

use super::templates::{Templates, dest, read_text};

/// `.gitignore` and `.prettierignore`, filtered for the project's target.
pub fn write_ignore_files(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    Ok(join_steps([
        filtered(templates, project, "gitignore", dest(".gitignore")?),
        filtered(templates, project, "prettierignore", dest(".prettierignore")?),
    ]))
}

fn filtered(
    templates: &Templates,
    project: &Project,
    source: &'static str,
    target: RelativePath,
) -> Step {
    let templates = Arc::clone(templates);
    let kind = project.target;
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let target = target.clone();
        async move {
            let text = read_text(templates.as_ref(), source).await?;
            Ok(changeset.insert(target, FileContent::Text(filter_ignore(&text, kind))))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::testing::{StubTemplates, project};
    use crate::domain::{Changeset, TargetKind};

    async fn staged_gitignore(target: TargetKind) -> String {
        let templates = StubTemplates::standard().shared();
        let staged = write_ignore_files(&templates, &project(target))
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();
        match staged.get(&RelativePath::try_new(".gitignore").unwrap()) {
            Some(FileContent::Text(text)) => text.clone(),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn npm_ignores_compiled_output() {
        let text = staged_gitignore(TargetKind::Npm).await;
        assert!(text.contains("*.js\n"));
        assert!(!text.contains("/dist"));
    }

    #[tokio::test]
    async fn webapp_ignores_dist() {
        let text = staged_gitignore(TargetKind::Webapp).await;
        assert!(text.contains("/dist\n"));
        assert!(!text.contains("*.d.ts"));
    }

    #[tokio::test]
    async fn both_files_are_staged() {
        let templates = StubTemplates::standard().shared();
        let staged = write_ignore_files(&templates, &project(TargetKind::Npm))
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();
        assert!(staged.contains(&RelativePath::try_new(".prettierignore").unwrap()));
        assert_eq!(staged.len(), 2);
    }
}
