use std::path::Path;

use repairlog_core::extract_equipment;

use crate::commands::common::{format_equipment_lines, read_note_input};
use crate::error::CliError;

pub fn run_extract(input: Option<&Path>, as_json: bool) -> Result<(), CliError> {
    let body = read_note_input(input)?;
    let equipments = extract_equipment(&body);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&equipments)?);
    } else if equipments.is_empty() {
        println!("No equipment found");
    } else {
        for line in format_equipment_lines(&equipments) {
            println!("{line}");
        }
    }

    Ok(())
}
