use crate::output::{print_json, print_table, print_yaml, OutputFormat};
use crusado_core::config::Config;

pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<()> {
    let set = super::load_templates(config)?;
    let templates = set.all();

    match output {
        OutputFormat::Json => return print_json(templates),
        OutputFormat::Yaml => return print_yaml(templates),
        OutputFormat::Table | OutputFormat::Wide => {}
    }

    if templates.is_empty() {
        println!("No templates in '{}'.", config.templates_dir.display());
        return Ok(());
    }

    let wide = output == OutputFormat::Wide;
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            let mut row = vec![t.name.clone(), t.kind.clone(), t.summary.clone()];
            if wide {
                let tasks: Vec<&str> = t.tasks.iter().map(|task| task.title.as_str()).collect();
                row.push(t.title.clone());
                row.push(tasks.join(", "));
            }
            row
        })
        .collect();

    if wide {
        print_table(&["NAME", "TYPE", "SUMMARY", "TITLE", "TASKS"], rows);
    } else {
        print_table(&["NAME", "TYPE", "SUMMARY"], rows);
    }
    Ok(())
}
