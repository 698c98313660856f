use crate::error::{CrusadoError, Result};
use crate::template::{Template, WorkItemType};
use crate::tracker::{WorkItem, WorkItemTracker};
use crate::validation::{self, ValidationErrors};
use serde::Serialize;
use serde_json::{json, Value};

const PARENT_RELATION: &str = "System.LinkTypes.Hierarchy-Reverse";

// ---------------------------------------------------------------------------
// JSON Patch document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOperation {
    pub op: &'static str,
    pub path: String,
    pub value: Value,
}

impl PatchOperation {
    fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "add",
            path: path.into(),
            value,
        }
    }
}

/// Body of a create request: the fields of the new item and its relations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(title: &str, description: &str, area_path: &str, iteration_path: &str) -> Self {
        Self(vec![
            PatchOperation::add("/fields/System.Title", json!(title)),
            PatchOperation::add("/fields/System.Description", json!(description)),
            PatchOperation::add("/fields/System.AreaPath", json!(area_path)),
            PatchOperation::add("/fields/System.IterationPath", json!(iteration_path)),
        ])
    }

    /// Make the new item a child of the item at `parent_url`.
    pub fn with_parent(mut self, parent_url: &str) -> Self {
        self.0.push(PatchOperation::add(
            "/relations/-",
            json!({ "rel": PARENT_RELATION, "url": parent_url }),
        ));
        self
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn has_relations(&self) -> bool {
        self.0.iter().any(|op| op.path.starts_with("/relations"))
    }
}

// ---------------------------------------------------------------------------
// Applier
// ---------------------------------------------------------------------------

/// Where new items are filed.
#[derive(Debug, Clone)]
pub struct Placement {
    pub area_path: String,
    pub iteration_path: String,
}

/// One item reported by [`Applier::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub kind: WorkItemType,
    pub title: String,
    pub html_url: Option<String>,
    /// Validated only; nothing was saved.
    pub dry_run: bool,
}

/// Creates the work items described by a template.
pub struct Applier<'a, T: WorkItemTracker + ?Sized> {
    tracker: &'a T,
    placement: Placement,
    dry_run: bool,
}

impl<'a, T: WorkItemTracker + ?Sized> Applier<'a, T> {
    pub fn new(tracker: &'a T, placement: Placement, dry_run: bool) -> Self {
        Self {
            tracker,
            placement,
            dry_run,
        }
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Create a top-level item.
    pub fn create(&self, kind: WorkItemType, title: &str, description_html: &str) -> Result<WorkItem> {
        let document = self.document(title, description_html);
        self.send(kind, title, &document)
    }

    /// Create a task underneath `parent`. In dry-run mode the parent only
    /// exists as a validation result, so no relation is sent.
    pub fn create_task_under(
        &self,
        title: &str,
        description_html: &str,
        parent: &WorkItem,
        parent_kind: WorkItemType,
    ) -> Result<WorkItem> {
        let mut document = self.document(title, description_html);
        if !self.dry_run {
            let url = parent
                .url
                .as_deref()
                .ok_or(CrusadoError::ParentUrlMissing(parent_kind))?;
            document = document.with_parent(url);
        }
        self.send(WorkItemType::Task, title, &document)
    }

    /// Create the template's item, then each of its tasks in order.
    ///
    /// `on_created` is called after every successful create. The first
    /// failure stops the run.
    pub fn apply(&self, template: &Template, mut on_created: impl FnMut(&CreatedItem)) -> Result<()> {
        let kind = template.work_item_type().ok_or_else(|| {
            CrusadoError::Validation(ValidationErrors(
                validation::check_type(template).into_iter().collect(),
            ))
        })?;

        let parent = self.create(kind, &template.title, &template.description_html())?;
        on_created(&self.report(kind, &template.title, &parent));

        for task in &template.tasks {
            let item = self.create_task_under(&task.title, &task.description_html(), &parent, kind)?;
            on_created(&self.report(WorkItemType::Task, &task.title, &item));
        }
        Ok(())
    }

    fn document(&self, title: &str, description_html: &str) -> PatchDocument {
        PatchDocument::new(
            title,
            description_html,
            &self.placement.area_path,
            &self.placement.iteration_path,
        )
    }

    fn send(&self, kind: WorkItemType, title: &str, document: &PatchDocument) -> Result<WorkItem> {
        self.tracker
            .create_work_item(kind, document, self.dry_run)
            .map_err(|e| {
                tracing::error!(%kind, title, error = %e, "work item creation failed");
                CrusadoError::CreateFailed {
                    kind,
                    title: title.to_string(),
                    source: Box::new(e),
                }
            })
    }

    fn report(&self, kind: WorkItemType, title: &str, item: &WorkItem) -> CreatedItem {
        CreatedItem {
            kind,
            title: title.to_string(),
            html_url: item.html_url().map(str::to_string),
            dry_run: self.dry_run,
        }
    }
}
