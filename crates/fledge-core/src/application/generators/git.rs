use crate::application::{Step, join_steps};
use crate::domain::FileContent;
use crate::error::FledgeResult;

use super::templates::{Templates, copy_tree, dest};

/// Directories git expects even in a fresh repository.
const EMPTY_DIRS: &[&str] = &[
    ".git/objects/info",
    ".git/objects/pack",
    ".git/refs/heads",
    ".git/refs/tags",
    ".git/hooks",
];

/// A minimal `.git` directory: `HEAD`, `config` and `description` from the
/// template tree plus the empty object and ref directories.
pub fn write_git_skeleton(templates: &Templates) -> FledgeResult<Step> {
    let mut steps = vec![copy_tree(templates, "git", ".git", |_| true)];
    for dir in EMPTY_DIRS {
        steps.push(Step::insert(dest(dir)?, FileContent::EmptyDirectory));
    }
    Ok(join_steps(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::testing::StubTemplates;
    use crate::domain::{Changeset, FailureReason, RelativePath};

    #[tokio::test]
    async fn skeleton_has_files_and_empty_dirs() {
        let templates = StubTemplates::standard().shared();
        let staged = write_git_skeleton(&templates)
            .unwrap()
            .run(Changeset::empty())
            .await
            .unwrap()
            .unwrap();

        let paths: Vec<_> = staged.paths().map(RelativePath::as_str).collect();
        assert_eq!(
            paths,
            vec![
                ".git/HEAD",
                ".git/config",
                ".git/description",
                ".git/hooks",
                ".git/objects/info",
                ".git/objects/pack",
                ".git/refs/heads",
                ".git/refs/tags",
            ]
        );
        assert!(
            staged
                .get(&RelativePath::try_new(".git/hooks").unwrap())
                .unwrap()
                .is_directory()
        );
    }

    #[tokio::test]
    async fn existing_git_dir_entry_collides() {
        let templates = StubTemplates::standard().shared();
        let base = Changeset::empty()
            .insert(RelativePath::try_new(".git/HEAD").unwrap(), "ref: refs/heads/x\n")
            .unwrap();
        let result = write_git_skeleton(&templates).unwrap().run(base).await.unwrap();
        assert_eq!(result, Err(FailureReason::NotEmpty));
    }
}
