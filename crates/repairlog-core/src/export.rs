//! Inventory export helpers shared by the CLI commands.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, InventoryEntry};
use crate::models::Category;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable inventory entry used in JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub key: String,
    pub category: Category,
    /// HTML entity for the category, for HTML renderers
    pub icon: String,
    pub name: String,
    pub label: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub model_number: Option<String>,
    pub count: usize,
    pub last_seen: Option<NaiveDateTime>,
    pub details: Vec<String>,
}

/// Convert an inventory entry into its export record.
#[must_use]
pub fn entry_to_export_item(entry: &InventoryEntry) -> ExportEntry {
    let equipment = &entry.equipment;
    ExportEntry {
        key: entry.key.clone(),
        category: equipment.category,
        icon: equipment.category.icon().to_string(),
        name: equipment.display_name(),
        label: equipment.label(),
        brand: equipment.brand.clone(),
        model: equipment.model.clone(),
        serial: equipment.serial.clone(),
        model_number: equipment.model_number.clone(),
        count: entry.count,
        last_seen: entry.last_seen(),
        details: equipment.details.clone(),
    }
}

/// Render the inventory as pretty-printed JSON, grouped in display order.
pub fn render_json_export(inventory: &Inventory) -> serde_json::Result<String> {
    let items = inventory
        .groups()
        .into_iter()
        .flat_map(|(_, entries)| entries)
        .map(entry_to_export_item)
        .collect::<Vec<ExportEntry>>();
    serde_json::to_string_pretty(&items)
}

/// Render the inventory in Markdown, one section per category.
///
/// At most `max_details` details are listed per entry; the rest collapse
/// into a `+N more` line.
#[must_use]
pub fn render_markdown_export(inventory: &Inventory, max_details: usize) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Equipment inventory");

    if inventory.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No equipment found.");
        return output;
    }

    for (category, entries) in inventory.groups() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {} ({})", category.group_label(), entries.len());
        let _ = writeln!(output);
        for entry in entries {
            let equipment = &entry.equipment;
            let _ = write!(output, "- **{}**", equipment.display_name());
            if let Some(model_number) = &equipment.model_number {
                let _ = write!(output, " (model {model_number})");
            }
            if let Some(serial) = &equipment.serial {
                let _ = write!(output, " SN:{serial}");
            }
            if entry.count > 1 {
                let _ = write!(output, " x{}", entry.count);
            }
            if let Some(last_seen) = entry.last_seen() {
                let _ = write!(output, ", last seen {}", last_seen.format(DATE_FORMAT));
            }
            output.push('\n');

            for detail in equipment.details.iter().take(max_details) {
                let _ = writeln!(output, "  - {detail}");
            }
            let hidden = equipment.details.len().saturating_sub(max_details);
            if hidden > 0 {
                let _ = writeln!(output, "  - +{hidden} more");
            }
        }
    }

    output
}

/// Render the inventory in the selected export format.
pub fn render_inventory_export(
    inventory: &Inventory,
    format: ExportFormat,
    max_details: usize,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(inventory),
        ExportFormat::Markdown => Ok(render_markdown_export(inventory, max_details)),
    }
}

/// Build a deterministic default file name for an inventory export.
#[must_use]
pub fn suggested_export_file_name(client_id: &str, format: ExportFormat) -> String {
    format!("inventory_{client_id}.{}", format.extension())
}
