use crate::template::{Template, WorkItemType};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A single problem found in a loaded template set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    NameNotSet { file: String },
    DuplicateName { name: String },
    TypeNotSet { template: String },
    InvalidType { template: String, declared: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NameNotSet { file } => {
                write!(f, "template in '{file}': name not set")
            }
            ValidationError::DuplicateName { name } => {
                write!(f, "duplicate template name: '{name}' exists more than once")
            }
            ValidationError::TypeNotSet { template } => {
                write!(f, "template '{template}': type not set")
            }
            ValidationError::InvalidType { template, declared } => {
                let allowed: Vec<_> = WorkItemType::template_types()
                    .iter()
                    .map(|t| t.as_str())
                    .collect();
                write!(
                    f,
                    "template '{template}': invalid type '{declared}', should be one of [{}]",
                    allowed.join(", ")
                )
            }
        }
    }
}

/// Every validation failure of a template set, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was found.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a loaded template set as a whole.
pub fn validate(templates: &[Template]) -> Result<(), ValidationErrors> {
    let mut errors: Vec<_> = templates.iter().filter_map(check_name).collect();
    errors.extend(unique_names(templates));
    errors.extend(templates.iter().filter_map(check_type));
    ValidationErrors(errors).into_result()
}

pub fn check_name(template: &Template) -> Option<ValidationError> {
    template.name.trim().is_empty().then(|| ValidationError::NameNotSet {
        file: template.source.path.display().to_string(),
    })
}

/// The first occurrence of a name wins; each later one is an error.
/// Unnamed templates are left to [`check_name`].
pub fn unique_names(templates: &[Template]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    templates
        .iter()
        .filter(|t| !t.name.trim().is_empty())
        .filter(|t| !seen.insert(t.name.as_str()))
        .map(|t| ValidationError::DuplicateName {
            name: t.name.clone(),
        })
        .collect()
}

pub fn check_type(template: &Template) -> Option<ValidationError> {
    if template.kind.is_empty() {
        return Some(ValidationError::TypeNotSet {
            template: template.name.clone(),
        });
    }
    if template.work_item_type().is_none() {
        return Some(ValidationError::InvalidType {
            template: template.name.clone(),
            declared: template.kind.clone(),
        });
    }
    None
}
