//! Template reading helpers shared by the generators.

use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::TemplateProvider;
use crate::application::{ApplicationError, Step, join_steps};
use crate::domain::{DomainError, FileContent, RelativePath};
use crate::error::{FledgeError, FledgeResult};

pub type Templates = Arc<dyn TemplateProvider>;

/// Template contents as UTF-8 text.
pub async fn read_text(templates: &dyn TemplateProvider, name: &str) -> FledgeResult<String> {
    let bytes = templates.read_template(name).await?;
    String::from_utf8(bytes).map_err(|e| malformed(name, e.to_string()))
}

/// Parse a JSON template and pass it through `transform`.
pub async fn modify_json<F>(
    templates: &dyn TemplateProvider,
    name: &str,
    transform: F,
) -> FledgeResult<Value>
where
    F: FnOnce(Value) -> Result<Value, DomainError>,
{
    let bytes = templates.read_template(name).await?;
    let document: Value =
        serde_json::from_slice(&bytes).map_err(|e| malformed(name, e.to_string()))?;
    transform(document).map_err(|e| malformed(name, e.to_string()))
}

/// Stage template `source` verbatim at `dest`.
pub fn copy(templates: &Templates, source: impl Into<String>, dest: RelativePath) -> Step {
    let templates = Arc::clone(templates);
    let source: Arc<str> = source.into().into();
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let source = Arc::clone(&source);
        let dest = dest.clone();
        async move {
            let bytes = templates.read_template(&source).await?;
            Ok(changeset.insert(dest, FileContent::Bytes(bytes)))
        }
    })
}

/// Stage every file under template directory `dir` that `keep` accepts,
/// below `dest_dir`. The copies run as one parallel join.
pub fn copy_tree<K>(templates: &Templates, dir: &'static str, dest_dir: &'static str, keep: K) -> Step
where
    K: Fn(&str) -> bool + Send + Sync + 'static,
{
    let templates = Arc::clone(templates);
    let keep = Arc::new(keep);
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let keep = Arc::clone(&keep);
        async move {
            let listed = templates.list_template_tree(dir).await?;
            let copies = listed
                .iter()
                .filter(|relative| (*keep)(relative))
                .map(|relative| {
                    let dest = RelativePath::try_new(format!("{dest_dir}/{relative}"))
                        .map_err(|e| malformed(dir, e.to_string()))?;
                    Ok(copy(&templates, format!("{dir}/{relative}"), dest))
                })
                .collect::<FledgeResult<Vec<_>>>()?;

            tracing::debug!(dir, files = copies.len(), "copying template tree");
            join_steps(copies).run(changeset).await
        }
    })
}

pub fn malformed(name: &str, reason: impl Into<String>) -> FledgeError {
    ApplicationError::MalformedTemplate {
        name: name.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Parse a generator's fixed destination.
pub fn dest(path: &str) -> FledgeResult<RelativePath> {
    RelativePath::try_new(path).map_err(FledgeError::from)
}
