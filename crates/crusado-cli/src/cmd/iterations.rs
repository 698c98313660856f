use crate::output::{print_json, print_table, print_yaml, OutputFormat};
use anyhow::Context;
use crusado_core::config::Config;
use crusado_core::iteration::{self, Iteration, IterationScope};
use crusado_core::WorkItemTracker;
use serde::Serialize;

#[derive(Serialize)]
struct IterationRow<'a> {
    /// Value to pass to `apply --iteration-offset`.
    offset: Option<i64>,
    #[serde(flatten)]
    iteration: &'a Iteration,
}

pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<()> {
    let (client, _) = super::connect(config)?;
    let current = iteration::current(&client).context("failed to get the current iteration")?;
    let all = client
        .list_iterations(IterationScope::All)
        .context("failed to list iterations")?;

    let rows: Vec<IterationRow> = iteration::with_offsets(&all, &current.id)
        .into_iter()
        .map(|(offset, iteration)| IterationRow { offset, iteration })
        .collect();

    match output {
        OutputFormat::Json => return print_json(&rows),
        OutputFormat::Yaml => return print_yaml(&rows),
        OutputFormat::Table | OutputFormat::Wide => {}
    }

    let wide = output == OutputFormat::Wide;
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let offset = match r.offset {
                Some(0) => "0 (current)".to_string(),
                Some(o) => format!("{o:+}"),
                None => "?".to_string(),
            };
            let mut row = vec![
                offset,
                r.iteration.name.clone(),
                r.iteration.path.clone().unwrap_or_default(),
            ];
            if wide {
                let attrs = r.iteration.attributes.clone().unwrap_or_default();
                row.push(attrs.start_date.unwrap_or_default());
                row.push(attrs.finish_date.unwrap_or_default());
            }
            row
        })
        .collect();

    if wide {
        print_table(&["OFFSET", "NAME", "PATH", "START", "FINISH"], table);
    } else {
        print_table(&["OFFSET", "NAME", "PATH"], table);
    }
    Ok(())
}
