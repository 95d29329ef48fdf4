//! IntelliJ project metadata under `.idea/`.

use std::sync::Arc;

use crate::application::{Step, chain_steps};
use crate::domain::{FileContent, Project, RelativePath, XmlElement};
use crate::error::FledgeResult;

use super::templates::{Templates, copy, copy_tree, dest, malformed, read_text};

/// Module file name inside the template tree.
const TEMPLATE_MODULE: &str = "create-project.iml";

pub fn write_idea_files(templates: &Templates, project: &Project) -> FledgeResult<Step> {
    let module_file = format!("{}.iml", project.npm_package.name);
    Ok(chain_steps([
        copy_tree(templates, "idea", ".idea", is_misc_file),
        write_modules_xml(templates, module_file.clone(), dest(".idea/modules.xml")?),
        copy(
            templates,
            format!("idea/{TEMPLATE_MODULE}"),
            dest(".idea")?.join(&module_file)?,
        ),
        write_dictionary(templates, dest(".idea/dictionaries/project.xml")?),
    ]))
}

/// Files copied as-is; everything else is either generated or per-user.
fn is_misc_file(path: &str) -> bool {
    let top = path.split('/').next().unwrap_or(path);
    !matches!(top, "dictionaries" | "runConfigurations")
        && !matches!(path, "workspace.xml" | "tasks.xml" | "modules.xml")
        && !path.ends_with(".iml")
}

fn write_modules_xml(templates: &Templates, module_file: String, target: RelativePath) -> Step {
    let templates = Arc::clone(templates);
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let module_file = module_file.clone();
        let target = target.clone();
        async move {
            let source = "idea/modules.xml";
            let xml = read_text(templates.as_ref(), source).await?;
            let document = XmlElement::parse(source, &xml)?;
            let renamed = rename_module(document, &module_file)
                .ok_or_else(|| malformed(source, "no module entry references the module file"))?;
            Ok(changeset.insert(target, FileContent::Xml(renamed)))
        }
    })
}

/// Point `project > component > modules > module` entries at `module_file`.
///
/// Only `fileurl` and `filepath` values ending in the template module name
/// are touched. `None` if no such entry exists.
fn rename_module(mut document: XmlElement, module_file: &str) -> Option<XmlElement> {
    if document.name() != "project" {
        return None;
    }

    let mut renamed = false;
    for component in document.elements_mut().filter(|e| e.name() == "component") {
        for modules in component.elements_mut().filter(|e| e.name() == "modules") {
            for module in modules.elements_mut().filter(|e| e.name() == "module") {
                for key in ["fileurl", "filepath"] {
                    let Some(prefix) = module
                        .attribute(key)
                        .and_then(|value| value.strip_suffix(TEMPLATE_MODULE))
                    else {
                        continue;
                    };
                    let value = format!("{prefix}{module_file}");
                    module.set_attribute(key, value);
                    renamed = true;
                }
            }
        }
    }
    renamed.then_some(document)
}

fn write_dictionary(templates: &Templates, target: RelativePath) -> Step {
    let templates = Arc::clone(templates);
    Step::new(move |changeset| {
        let templates = Arc::clone(&templates);
        let target = target.clone();
        async move {
            let words = read_text(templates.as_ref(), "dictionary.txt").await?;
            Ok(changeset.insert(target, dictionary_xml(&words)))
        }
    })
}

/// Project dictionary: trimmed, non-empty words in sorted order.
pub fn dictionary_xml(words: &str) -> XmlElement {
    let mut words: Vec<&str> = words
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect();
    words.sort_unstable();

    XmlElement::new("component")
        .with_attribute("name", "ProjectDictionaryState")
        .with_child(
            XmlElement::new("dictionary")
                .with_attribute("name", "project")
                .with_child(
                    XmlElement::new("words")
                        .with_children(words.into_iter().map(|w| XmlElement::new("w").with_text(w))),
                ),
        )
}
