//! In-memory template provider for testing.

use std::collections::BTreeMap;

use async_trait::async_trait;

use fledge_core::{
    application::{ApplicationError, ports::TemplateProvider},
    error::FledgeResult,
};

use super::list_below;

/// Templates held in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    templates: BTreeMap<String, Vec<u8>>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one template.
    pub fn with(mut self, name: impl Into<String>, contents: impl AsRef<[u8]>) -> Self {
        self.templates
            .insert(name.into(), contents.as_ref().to_vec());
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.templates.remove(name);
        self
    }
}

#[async_trait]
impl TemplateProvider for MemoryTemplates {
    async fn read_template(&self, name: &str) -> FledgeResult<Vec<u8>> {
        self.templates.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    async fn list_template_tree(&self, dir: &str) -> FledgeResult<Vec<String>> {
        Ok(list_below(self.templates.keys().map(String::as_str), dir))
    }
}
