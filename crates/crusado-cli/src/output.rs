use clap::ValueEnum;
use colored::{Color, Colorize};
use crusado_core::WorkItemType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table or view
    Table,
    /// Table with additional columns
    Wide,
    Json,
    Yaml,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    print!("{}", yaml);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// One work item as a single line: icon, type, coloured title, addendum.
pub fn item_line(kind: WorkItemType, title: &str, addendum: &str) -> String {
    let (icon, color) = match kind {
        WorkItemType::UserStory => ("📖", Color::Green),
        WorkItemType::Bug => ("🐛", Color::Red),
        WorkItemType::Task => ("   📋", Color::Cyan),
    };
    let line = format!("{icon} {kind} {}", title.color(color));
    if addendum.is_empty() {
        line
    } else {
        format!("{line} {addendum}")
    }
}

/// `Project\Release 1\Sprint 3` as `Project > Release 1 > Sprint 3`.
pub fn iteration_path_line(path: &str) -> String {
    let parts: Vec<String> = path
        .split('\\')
        .map(|p| p.yellow().to_string())
        .collect();
    format!("🔁 Iteration Path: {}", parts.join(" > "))
}
