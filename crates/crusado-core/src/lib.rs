//! Templates for Azure DevOps work items.
//!
//! A template describes a user story or bug plus the tasks that belong to
//! it. Templates live in a directory as Markdown files with YAML
//! frontmatter, or as legacy YAML files holding a `templates` list.
//!
//! ```text
//! templates dir ──► loader ──► validation ──► TemplateSet
//!                                                 │
//!                    iteration::resolve_path ──► Applier ──► WorkItemTracker
//! ```

pub mod config;
pub mod error;
pub mod iteration;
pub mod loader;
pub mod markdown;
pub mod store;
pub mod template;
pub mod tracker;
pub mod validation;
pub mod workitems;

pub use error::{CrusadoError, Result};
pub use store::TemplateSet;
pub use template::{Task, Template, WorkItemType};
pub use tracker::{AzureDevOps, WorkItem, WorkItemTracker};
pub use validation::{ValidationError, ValidationErrors};
pub use workitems::{Applier, CreatedItem, Placement};
