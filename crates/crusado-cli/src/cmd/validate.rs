use crate::output::{print_json, print_yaml, OutputFormat};
use crusado_core::config::Config;
use crusado_core::loader::{self, SkippedFile};
use crusado_core::{validation, CrusadoError, ValidationErrors};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    templates: usize,
    skipped: Vec<SkippedRow<'a>>,
    errors: &'a ValidationErrors,
}

#[derive(Serialize)]
struct SkippedRow<'a> {
    path: String,
    reason: &'a str,
}

impl<'a> From<&'a SkippedFile> for SkippedRow<'a> {
    fn from(skipped: &'a SkippedFile) -> Self {
        Self {
            path: skipped.path.display().to_string(),
            reason: &skipped.reason,
        }
    }
}

pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<()> {
    let outcome = loader::load_dir(&config.templates_dir)?;
    let errors = match validation::validate(&outcome.templates) {
        Ok(()) => ValidationErrors::default(),
        Err(errors) => errors,
    };

    match output {
        OutputFormat::Json | OutputFormat::Yaml => {
            let report = Report {
                templates: outcome.templates.len(),
                skipped: outcome.skipped.iter().map(SkippedRow::from).collect(),
                errors: &errors,
            };
            if output == OutputFormat::Json {
                print_json(&report)?;
            } else {
                print_yaml(&report)?;
            }
        }
        OutputFormat::Table | OutputFormat::Wide => {
            for skipped in &outcome.skipped {
                println!("[skipped] {}: {}", skipped.path.display(), skipped.reason);
            }
            for e in errors.iter() {
                println!("[error] {e}");
            }
            if errors.is_empty() {
                println!("{} templates are valid.", outcome.templates.len());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CrusadoError::Validation(errors).into())
    }
}
