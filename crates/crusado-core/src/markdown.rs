//! Markdown templates: a YAML frontmatter block followed by the description body.

use crate::error::{CrusadoError, Result};
use crate::template::{DescriptionFormat, Template, TemplateSource};
use pulldown_cmark::{html, Options, Parser};
use std::path::Path;

const DELIMITER: &str = "---";

/// Split `content` into its frontmatter block and the body that follows it.
///
/// The first line must be `---`; the block ends at the next `---` line.
/// Returns `None` when either delimiter is missing.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Render Markdown to HTML, the format Azure DevOps expects in description fields.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Parse a Markdown template. The rendered body becomes the description.
pub fn parse(content: &str, path: &Path) -> Result<Template> {
    let (meta, body) = split_frontmatter(content).ok_or(CrusadoError::MissingFrontmatter)?;

    let mut template: Template = serde_yaml::from_str(meta)?;
    template.description = render_html(body);
    template.source = TemplateSource {
        path: path.to_path_buf(),
        format: DescriptionFormat::Html,
    };
    Ok(template)
}
