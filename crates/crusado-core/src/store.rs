use crate::error::{CrusadoError, Result};
use crate::loader::{self, SkippedFile};
use crate::template::Template;
use crate::validation;
use std::path::Path;

/// The validated templates of one directory, loaded fresh per invocation.
#[derive(Debug)]
pub struct TemplateSet {
    templates: Vec<Template>,
    skipped: Vec<SkippedFile>,
}

impl TemplateSet {
    /// Load and validate all templates in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let outcome = loader::load_dir(dir)?;
        validation::validate(&outcome.templates).map_err(CrusadoError::Validation)?;

        let mut templates = outcome.templates;
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self {
            templates,
            skipped: outcome.skipped,
        })
    }

    /// All templates, sorted by name.
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| CrusadoError::TemplateNotFound(name.to_string()))
    }
}
