use std::path::{Path, PathBuf};

use repairlog_core::export::{render_inventory_export, suggested_export_file_name};
use repairlog_core::{build_inventory, extract_from_notes, Note, ShopConfig};

use crate::cli::ExportFormat;
use crate::commands::common::{read_json_file, write_output};
use crate::error::CliError;

const ALL_CLIENTS: &str = "all";

pub fn run_inventory(
    notes_path: &Path,
    format: ExportFormat,
    output_path: Option<&Path>,
    client_id: Option<&str>,
    config: &ShopConfig,
) -> Result<(), CliError> {
    let notes: Vec<Note> = read_json_file(notes_path)?;
    let with_equipment = extract_from_notes(&notes);
    let inventory = build_inventory(&with_equipment);
    tracing::info!(
        notes = notes.len(),
        entries = inventory.len(),
        "built inventory"
    );

    let rendered =
        render_inventory_export(&inventory, format.into(), config.max_displayed_details)?;
    let target = output_path.map(|path| resolve_output_path(path, format, client_id));
    write_output(&rendered, target.as_deref())
}

/// A directory output gets the default inventory file name for the client.
pub fn resolve_output_path(path: &Path, format: ExportFormat, client_id: Option<&str>) -> PathBuf {
    if path.is_dir() {
        let client_id = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ALL_CLIENTS);
        path.join(suggested_export_file_name(client_id, format.into()))
    } else {
        path.to_path_buf()
    }
}
