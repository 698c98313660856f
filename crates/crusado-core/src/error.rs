use crate::template::WorkItemType;
use crate::validation::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrusadoError {
    #[error("missing configuration: set {0}")]
    MissingConfig(&'static str),

    #[error("cannot read templates directory '{}': {source}", path.display())]
    TemplatesDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("markdown doesn't have the expected frontmatter block")]
    MissingFrontmatter,

    #[error("yaml document has no 'templates' key")]
    MissingTemplatesKey,

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("invalid templates:\n{0}")]
    Validation(ValidationErrors),

    #[error("current iteration could not be identified: {0} iterations found")]
    CurrentIterationUnidentifiable(usize),

    #[error("current iteration '{0}' is missing from the list of team iterations")]
    CurrentIterationNotListed(String),

    #[error("iteration offset too far in the past: {0}")]
    OffsetTooFarInPast(i64),

    #[error("iteration offset too far in the future: {0}")]
    OffsetTooFarInFuture(i64),

    #[error("iteration path could not be retrieved")]
    IterationPathNotSet,

    #[error("invalid organization url '{0}'")]
    InvalidUrl(String),

    #[error("could not create {kind} '{title}'")]
    CreateFailed {
        kind: WorkItemType,
        title: String,
        #[source]
        source: Box<CrusadoError>,
    },

    #[error("created {0} has no url to link tasks to")]
    ParentUrlMissing(WorkItemType),

    #[error("azure devops returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrusadoError>;
