use std::sync::Arc;

use crate::application::{Step, chain_steps};
use crate::domain::{FileContent, Project, TargetKind, compute_manifest};
use crate::error::FledgeResult;

use super::templates::{Templates, copy, dest, modify_json};

/// `package.json`, plus `.npmignore` for libraries.
pub fn write_npm_files(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    let npmignore = match project.target {
        TargetKind::Npm => copy(templates, "npmignore", dest(".npmignore")?),
        TargetKind::Webapp => Step::identity(),
    };
    Ok(chain_steps([write_package_json(templates, project)?, npmignore]))
}

fn write_package_json(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    let templates = Arc::clone(templates);
    let project = Arc::new(project.clone());
    let target = dest("package.json")?;
    Ok(Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let project = Arc::clone(&project);
        let target = target.clone();
        async move {
            let manifest = modify_json(templates.as_ref(), "package.json", |template| {
                compute_manifest(template, &project)
            })
            .await?;
            Ok(changeset.insert(target, FileContent::Json(manifest)))
        }
    }))
}
