use crate::error::{CrusadoError, Result};
use crate::markdown;
use crate::template::{DescriptionFormat, Template, TemplateSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// TemplateFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Markdown,
    Yaml,
}

impl TemplateFormat {
    /// Classify a file by extension. Unsupported files yield `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "md" | "markdown" => Some(TemplateFormat::Markdown),
            "yaml" | "yml" => Some(TemplateFormat::Yaml),
            _ => None,
        }
    }

    /// Parse a file's content. Markdown yields one template, YAML any number.
    pub fn parse(self, content: &str, path: &Path) -> Result<Vec<Template>> {
        match self {
            TemplateFormat::Markdown => Ok(vec![markdown::parse(content, path)?]),
            TemplateFormat::Yaml => parse_yaml(content, path),
        }
    }
}

// ---------------------------------------------------------------------------
// YAML
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TemplateFile {
    templates: Option<Vec<Template>>,
}

/// Parse the legacy YAML layout: a `templates` key holding a list of records.
pub fn parse_yaml(content: &str, path: &Path) -> Result<Vec<Template>> {
    let file: TemplateFile = serde_yaml::from_str(content)?;
    let mut templates = file.templates.ok_or(CrusadoError::MissingTemplatesKey)?;
    for t in &mut templates {
        t.source = TemplateSource {
            path: path.to_path_buf(),
            format: DescriptionFormat::Markdown,
        };
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

/// A file that was skipped during loading, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub templates: Vec<Template>,
    pub skipped: Vec<SkippedFile>,
}

/// Load every template from the direct children of `dir`.
///
/// Files that cannot be read or parsed are logged and skipped. Only a
/// failure to read the directory itself is an error. Files are visited in
/// name order so the result does not depend on the filesystem.
pub fn load_dir(dir: &Path) -> Result<LoadOutcome> {
    let read_dir = |source: std::io::Error| CrusadoError::TemplatesDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if let Some(format) = TemplateFormat::from_path(&path) {
            files.push((path, format));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut outcome = LoadOutcome::default();
    for (path, format) in files {
        match load_file(&path, format) {
            Ok(templates) => {
                tracing::debug!(path = %path.display(), count = templates.len(), "loaded templates");
                outcome.templates.extend(templates);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping template file");
                outcome.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}

fn load_file(path: &Path, format: TemplateFormat) -> Result<Vec<Template>> {
    let content = std::fs::read_to_string(path)?;
    format.parse(&content, path)
}
