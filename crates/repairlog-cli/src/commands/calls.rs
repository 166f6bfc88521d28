use std::path::Path;

use repairlog_core::calls::{calls_for_client, load_call_log};
use repairlog_core::timeline::merge_timeline;
use repairlog_core::{reconcile_calls, Client, TimelineItem};

use crate::commands::common::{find_client, format_timeline_lines, read_json_file};
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_calls(
    call_log: Option<&Path>,
    timeline_path: Option<&Path>,
    client_id: Option<&str>,
    phones: &[String],
    as_json: bool,
    config: &CliConfig,
) -> Result<(), CliError> {
    let call_log = call_log
        .or(config.call_log.as_deref())
        .ok_or(CliError::CallLogNotConfigured)?;
    let entries = load_call_log(call_log, &config.shop.country_code)?;

    let calls = match select_client(client_id, phones, config)? {
        Some(client) => calls_for_client(&entries, &client, &config.shop.country_code),
        None => entries,
    };

    let mut items: Vec<TimelineItem> = match timeline_path {
        Some(path) => read_json_file(path)?,
        None => Vec::new(),
    };
    let reconciliation = reconcile_calls(&mut items, &calls, config.shop.call_match_window_secs);
    let added = reconciliation.new_items.len();
    let merged = merge_timeline([items, reconciliation.new_items]);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&merged)?);
    } else {
        for line in format_timeline_lines(&merged) {
            println!("{line}");
        }
        println!(
            "Enriched {} existing calls, added {added} calls from the call log",
            reconciliation.enriched
        );
    }

    Ok(())
}

/// Client whose numbers filter the call log, if any filter was requested.
///
/// `--phone` numbers are added to the configured client's numbers.
pub fn select_client(
    client_id: Option<&str>,
    phones: &[String],
    config: &CliConfig,
) -> Result<Option<Client>, CliError> {
    let mut client = match client_id {
        Some(id) => {
            let clients_path = config
                .clients
                .as_deref()
                .ok_or(CliError::ClientsNotConfigured)?;
            let clients: Vec<Client> = read_json_file(clients_path)?;
            find_client(clients, id)?
        }
        None if phones.is_empty() => return Ok(None),
        None => Client::default(),
    };
    client.phones.extend(phones.iter().cloned());
    Ok(Some(client))
}
