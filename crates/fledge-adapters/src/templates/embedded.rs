//! Templates compiled into the binary.

use async_trait::async_trait;

use fledge_core::{
    application::{ApplicationError, ports::TemplateProvider},
    error::FledgeResult,
};

use super::list_below;

macro_rules! embed {
    ($($name:literal),* $(,)?) => {
        &[$((
            $name,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name)) as &[u8],
        )),*]
    };
}

/// Sorted by name.
const EMBEDDED: &[(&str, &[u8])] = embed![
    "dictionary.txt",
    "eslintignore",
    "git/HEAD",
    "git/config",
    "git/description",
    "github/workflows/ci.yml",
    "gitignore",
    "idea/codeStyles/Project.xml",
    "idea/codeStyles/codeStyleConfig.xml",
    "idea/create-project.iml",
    "idea/inspectionProfiles/Project_Default.xml",
    "idea/jsLinters/eslint.xml",
    "idea/misc.xml",
    "idea/modules.xml",
    "idea/prettier.xml",
    "idea/vcs.xml",
    "index.test.ts",
    "index.ts",
    "npmignore",
    "package.json",
    "prettierignore",
    "renovate.json",
    "tsconfig.json",
    "tsconfig.test.json",
    "webpack.config.js",
];

/// The template set shipped with Fledge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Every embedded template name.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

#[async_trait]
impl TemplateProvider for EmbeddedTemplates {
    async fn read_template(&self, name: &str) -> FledgeResult<Vec<u8>> {
        EMBEDDED
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name))
            .map(|index| EMBEDDED[index].1.to_vec())
            .map_err(|_| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    async fn list_template_tree(&self, dir: &str) -> FledgeResult<Vec<String>> {
        Ok(list_below(self.names(), dir))
    }
}
