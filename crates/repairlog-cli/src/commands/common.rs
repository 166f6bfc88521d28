use std::fmt::Write as _;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use repairlog_core::{Client, Equipment, TimelineItem};
use serde::de::DeserializeOwned;

use crate::error::CliError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const STDIN_LABEL: &str = "stdin";

/// Read a note body from `path`, or from piped stdin when no path is given.
///
/// The body is returned untouched: leading whitespace carries structure.
pub fn read_note_input(path: Option<&Path>) -> Result<String, CliError> {
    if let Some(path) = path {
        return std::fs::read_to_string(path).map_err(|error| input_error(path, &error));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::Input {
            path: STDIN_LABEL.to_string(),
            message: "no input piped; pass a file path".to_string(),
        });
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(buffer)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|error| input_error(path, &error))?;
    serde_json::from_str(&raw).map_err(|error| input_error(path, &error))
}

fn input_error(path: &Path, error: &dyn std::fmt::Display) -> CliError {
    CliError::Input {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

pub fn find_client(clients: Vec<Client>, id: &str) -> Result<Client, CliError> {
    let wanted = id.trim();
    clients
        .into_iter()
        .find(|client| client.id == wanted)
        .ok_or_else(|| CliError::ClientNotFound(wanted.to_string()))
}

/// Write rendered output to `path`, or print it when no path is given.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }
    Ok(())
}

pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |timestamp| timestamp.format(TIMESTAMP_FORMAT).to_string(),
    )
}

pub fn format_equipment_lines(equipments: &[Equipment]) -> Vec<String> {
    let mut lines = Vec::new();
    for equipment in equipments {
        let mut line = equipment.label();
        if let Some(model_number) = &equipment.model_number {
            let _ = write!(line, " (model {model_number})");
        }
        if let Some(serial) = &equipment.serial {
            let _ = write!(line, " SN:{serial}");
        }
        lines.push(line);
        lines.extend(equipment.details.iter().map(|detail| format!("    - {detail}")));
    }
    lines
}

pub fn format_timeline_lines(items: &[TimelineItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let when = format_timestamp(item.date);
            let duration = item.duration_display.as_deref().unwrap_or("");
            format!(
                "{when:<16}  {:<16}  {duration:>8}  {}",
                item.type_label, item.subject
            )
        })
        .collect()
}
