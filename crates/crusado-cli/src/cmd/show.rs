use crate::output::{print_json, print_yaml, OutputFormat};
use crusado_core::config::Config;

pub fn run(config: &Config, name: &str, output: OutputFormat) -> anyhow::Result<()> {
    let set = super::load_templates(config)?;
    let template = set.get(name)?;

    match output {
        OutputFormat::Json => return print_json(template),
        OutputFormat::Yaml => return print_yaml(template),
        OutputFormat::Table | OutputFormat::Wide => {}
    }

    println!("Name:             {}", template.name);
    println!("Type:             {}", template.kind);
    println!("Title:            {}", template.title);
    if !template.summary.is_empty() {
        println!("Summary:          {}", template.summary);
    }
    if output == OutputFormat::Wide {
        println!("Source:           {}", template.source.path.display());
    }
    println!("Number of Tasks:  {}", template.tasks.len());
    if !template.tasks.is_empty() {
        println!("Task Overview:");
        for task in &template.tasks {
            println!("  - {}", task.title);
        }
    }
    Ok(())
}
