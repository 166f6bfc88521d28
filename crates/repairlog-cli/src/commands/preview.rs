use std::path::Path;

use repairlog_core::extract::{clean_body, structure_note};
use repairlog_core::ShopConfig;

use crate::commands::common::read_note_input;
use crate::error::CliError;

pub fn run_preview(
    input: Option<&Path>,
    lines: Option<usize>,
    show_levels: bool,
    config: &ShopConfig,
) -> Result<(), CliError> {
    let body = read_note_input(input)?;
    let max_lines = lines.unwrap_or(config.max_clean_lines);
    println!("{}", render_preview(&body, max_lines, show_levels));
    Ok(())
}

pub fn render_preview(body: &str, max_lines: usize, show_levels: bool) -> String {
    if !show_levels {
        return clean_body(body, max_lines);
    }

    structure_note(body)
        .into_iter()
        .take(max_lines)
        .map(|line| format!("{}  {}{}", line.level, "  ".repeat(line.level), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}
