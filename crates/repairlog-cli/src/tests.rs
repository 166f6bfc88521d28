use std::path::PathBuf;

use chrono::NaiveDate;
use clap::CommandFactory;
use pretty_assertions::assert_eq;
use repairlog_core::{extract_equipment, ShopConfig, TimelineItem, TimelineKind};

use crate::cli::{Cli, CompletionShell, ExportFormat};
use crate::commands::calls::{run_calls, select_client};
use crate::commands::common::{
    find_client, format_equipment_lines, format_timeline_lines, format_timestamp, read_json_file,
    read_note_input,
};
use crate::commands::completions::completion_script;
use crate::commands::inventory::{resolve_output_path, run_inventory};
use crate::commands::preview::render_preview;
use crate::config::CliConfig;
use crate::error::CliError;

const NOTES_JSON: &str = r#"[
    {"id": "n1", "date": "2026-01-05T09:00:00", "subject": "Note interne",
     "body": "Smartphone Samsung A54\n  ecran casse\nImprimante hp officejet 3830 series"},
    {"id": "n2", "date": "2026-01-12T14:30:00", "subject": "Note interne",
     "body": "smartphone samsung a54\n\tbatterie"},
    {"id": "n3", "subject": "Rappel", "body": "rappeler la cliente"}
]"#;

const CLIENTS_JSON: &str = r#"[
    {"id": "duhammel", "name": "Daniele Duhammel", "phones": ["06 81 37 28 29"]}
]"#;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn equipment_lines_list_label_then_details() {
    let equipments = extract_equipment("iPhone 12 sn:F2LX\n\tbatterie\n\tecran");
    assert_eq!(
        format_equipment_lines(&equipments),
        vec![
            "Smartphone - Apple - iPhone 12 SN:F2LX",
            "    - batterie",
            "    - ecran",
        ]
    );
}

#[test]
fn preview_shows_clean_body_or_levels() {
    let body = "Imac\n\tlent\n> cite\n      ram 4go\n-- \nsignature";
    assert_eq!(render_preview(body, 30, false), "Imac\n\tlent\n      ram 4go");
    assert_eq!(
        render_preview(body, 2, true),
        "0  Imac\n1    lent"
    );
}

#[test]
fn timeline_lines_show_date_label_and_duration() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 10).and_then(|day| day.and_hms_opt(10, 0, 0));
    let mut item = TimelineItem::new(TimelineKind::CallIncoming, date, "Appel entrant +33681372829", "");
    item.duration_display = Some("2min05s".to_string());

    let lines = format_timeline_lines(&[item]);
    assert_eq!(
        lines,
        vec!["2026-01-10 10:00  Incoming call      2min05s  Appel entrant +33681372829"]
    );
    assert_eq!(format_timestamp(None), "-");
}

#[test]
fn output_directory_gets_default_file_name() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        resolve_output_path(dir.path(), ExportFormat::Markdown, Some("duhammel")),
        dir.path().join("inventory_duhammel.md")
    );
    assert_eq!(
        resolve_output_path(dir.path(), ExportFormat::Json, None),
        dir.path().join("inventory_all.json")
    );

    let file = dir.path().join("custom.txt");
    assert_eq!(resolve_output_path(&file, ExportFormat::Json, None), file);
}

#[test]
fn inventory_command_writes_grouped_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.json");
    std::fs::write(&notes, NOTES_JSON).unwrap();

    run_inventory(
        &notes,
        ExportFormat::Markdown,
        Some(dir.path()),
        Some("duhammel"),
        &ShopConfig::default(),
    )
    .unwrap();

    let rendered = std::fs::read_to_string(dir.path().join("inventory_duhammel.md")).unwrap();
    assert!(rendered.contains("## Smartphones (1)"));
    assert!(rendered.contains("**Samsung A54** x2, last seen 2026-01-12"));
    assert!(rendered.contains("## Printers (1)"));
    assert!(rendered.contains("OfficeJet 3830"));
}

#[test]
fn inventory_command_reports_unreadable_notes() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.json");
    std::fs::write(&notes, "{not json").unwrap();

    let error = run_inventory(
        &notes,
        ExportFormat::Json,
        None,
        None,
        &ShopConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(error, CliError::Input { .. }));
    assert!(error.to_string().contains("notes.json"));
}

#[test]
fn missing_input_file_is_an_input_error() {
    let error = read_note_input(Some(&PathBuf::from("/nonexistent/note.txt"))).unwrap_err();
    assert!(error.to_string().starts_with("Failed to read /nonexistent/note.txt"));
}

#[test]
fn select_client_without_filters_keeps_every_call() {
    assert!(select_client(None, &[], &CliConfig::default())
        .unwrap()
        .is_none());
}

#[test]
fn select_client_from_phone_numbers() {
    let phones = vec!["0681372829".to_string()];
    let client = select_client(None, &phones, &CliConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(client.phones, phones);
}

#[test]
fn select_client_requires_clients_file() {
    let error = select_client(Some("duhammel"), &[], &CliConfig::default()).unwrap_err();
    assert!(matches!(error, CliError::ClientsNotConfigured));
}

#[test]
fn select_client_reads_clients_file() {
    let dir = tempfile::tempdir().unwrap();
    let clients = dir.path().join("clients.json");
    std::fs::write(&clients, CLIENTS_JSON).unwrap();
    let config = CliConfig {
        clients: Some(clients),
        ..CliConfig::default()
    };

    let client = select_client(Some(" duhammel "), &["+33139660499".to_string()], &config)
        .unwrap()
        .unwrap();
    assert_eq!(client.name, "Daniele Duhammel");
    assert_eq!(client.phones.len(), 2);

    let error = select_client(Some("dupont"), &[], &config).unwrap_err();
    assert!(matches!(error, CliError::ClientNotFound(id) if id == "dupont"));
}

#[test]
fn find_client_matches_exact_id() {
    let clients: Vec<repairlog_core::Client> = serde_json::from_str(CLIENTS_JSON).unwrap();
    assert!(find_client(clients, "duham").is_err());
}

#[test]
fn calls_command_needs_a_call_log() {
    let error = run_calls(None, None, None, &[], true, &CliConfig::default()).unwrap_err();
    assert!(matches!(error, CliError::CallLogNotConfigured));
}

#[test]
fn calls_command_runs_against_exports() {
    let dir = tempfile::tempdir().unwrap();
    let call_log = dir.path().join("calls.json");
    std::fs::write(
        &call_log,
        r#"[{"number": "0681372829", "duration": 125, "date": 1768035600000, "type": 1}]"#,
    )
    .unwrap();
    let timeline = dir.path().join("timeline.json");
    std::fs::write(&timeline, "[]").unwrap();

    let config = CliConfig {
        call_log: Some(call_log),
        ..CliConfig::default()
    };
    run_calls(
        None,
        Some(&timeline),
        None,
        &["06 81 37 28 29".to_string()],
        true,
        &config,
    )
    .unwrap();
}

#[test]
fn read_json_file_decodes_typed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(&path, r#"[{"type": "calendar", "type_label": "Appointment", "direction": "calendar", "subject": "RDV", "date": null}]"#).unwrap();

    let items: Vec<TimelineItem> = read_json_file(&path).unwrap();
    assert_eq!(items[0].kind, TimelineKind::Calendar);
}

#[test]
fn completion_scripts_name_the_binary() {
    let mut command = Cli::command();
    let script = String::from_utf8(completion_script(CompletionShell::Bash, &mut command)).unwrap();
    assert!(script.contains("repairlog"));
}
