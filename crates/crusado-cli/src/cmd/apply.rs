use crate::output::{item_line, iteration_path_line};
use anyhow::Context;
use crusado_core::config::Config;
use crusado_core::{iteration, Applier, CreatedItem, Placement, WorkItemType};
use std::io::{BufRead, Write};

pub struct ApplyArgs {
    pub name: String,
    pub dry_run: bool,
    pub auto_approve: bool,
    pub iteration_offset: i64,
}

pub fn run(config: &Config, args: &ApplyArgs) -> anyhow::Result<()> {
    // Templates are validated before anything goes over the wire.
    let set = super::load_templates(config)?;
    let template = set.get(&args.name)?;
    let kind = template
        .work_item_type()
        .with_context(|| format!("template '{}' has no valid type", template.name))?;

    let (client, remote) = super::connect(config)?;
    let iteration_path = iteration::resolve_path(&client, args.iteration_offset).with_context(|| {
        format!(
            "failed to resolve the iteration at offset {}",
            args.iteration_offset
        )
    })?;

    let applier = Applier::new(
        &client,
        Placement {
            area_path: remote.area_path().to_string(),
            iteration_path,
        },
        args.dry_run,
    );

    println!("{}\n", iteration_path_line(&applier.placement().iteration_path));

    if !args.auto_approve {
        println!("{}", item_line(kind, &template.title, ""));
        for task in &template.tasks {
            println!("{}", item_line(WorkItemType::Task, &task.title, ""));
        }

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let question = "Create these work items in the specified iteration path?";
        if !confirm(question, &mut stdin.lock(), &mut stdout)? {
            println!("No work items created.");
            return Ok(());
        }
        println!();
    }

    tracing::debug!(template = %template.name, dry_run = args.dry_run, "applying template");
    applier
        .apply(template, |item| {
            println!("{}", item_line(item.kind, &item.title, &outcome(item)));
        })
        .with_context(|| format!("could not apply template '{}'", template.name))?;
    Ok(())
}

fn outcome(item: &CreatedItem) -> String {
    if item.dry_run {
        return "would be created".to_string();
    }
    match &item.html_url {
        Some(url) => format!("created successfully at {url}"),
        None => "created successfully".to_string(),
    }
}

/// Ask a yes/no question until it is answered. End of input means no.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<bool> {
    loop {
        write!(out, "\n{prompt} [y/n]: ")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}
