use crate::markdown;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// WorkItemType
// ---------------------------------------------------------------------------

/// Kinds of work items crusado creates in Azure DevOps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemType {
    UserStory,
    Bug,
    Task,
}

impl WorkItemType {
    /// Types a template may declare. `Task` is reserved for generated sub-items.
    pub fn template_types() -> &'static [WorkItemType] {
        &[WorkItemType::UserStory, WorkItemType::Bug]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkItemType::UserStory => "UserStory",
            WorkItemType::Bug => "Bug",
            WorkItemType::Task => "Task",
        }
    }

    /// Name of the work item type in the Azure DevOps process template.
    pub fn remote_name(self) -> &'static str {
        match self {
            WorkItemType::UserStory => "User Story",
            WorkItemType::Bug => "Bug",
            WorkItemType::Task => "Task",
        }
    }

    /// Parse a declared template type. Only the template types are accepted.
    pub fn from_template_type(s: &str) -> Option<Self> {
        Self::template_types()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
    }
}

impl fmt::Display for WorkItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_name())
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionFormat {
    /// Already rendered, as produced from a Markdown template body.
    Html,
    /// Plain Markdown, as written in a YAML template.
    #[default]
    Markdown,
}

/// Where a template was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSource {
    pub path: PathBuf,
    pub format: DescriptionFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    /// Unique name of the template, used on the command line.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    /// Declared type, kept verbatim so validation can report what was written.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(skip)]
    pub source: TemplateSource,
}

impl Template {
    /// The work item type this template creates, if the declared type is valid.
    pub fn work_item_type(&self) -> Option<WorkItemType> {
        WorkItemType::from_template_type(&self.kind)
    }

    /// Description of the parent item as HTML.
    pub fn description_html(&self) -> Cow<'_, str> {
        match self.source.format {
            DescriptionFormat::Html => Cow::Borrowed(&self.description),
            DescriptionFormat::Markdown => Cow::Owned(markdown::render_html(&self.description)),
        }
    }
}

impl Task {
    pub fn description_html(&self) -> String {
        markdown::render_html(&self.description)
    }
}
