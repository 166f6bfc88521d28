//! Phone call log: loading the phone's export, matching it to clients, and
//! reconciling it with the calls already present in a timeline.

mod android;
mod reconcile;

pub use android::{load_call_log, parse_call_log};
pub use reconcile::{reconcile_calls, Reconciliation};

use crate::models::{CallLogEntry, Client};

/// Canonical form of a phone number for matching.
///
/// Spaces, dashes and dots are removed. A 10-digit national number starting
/// with `0` gets `country_code` in place of the `0`.
#[must_use]
pub fn normalize_phone(number: &str, country_code: &str) -> String {
    let compact = number
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '.')
        .collect::<String>();
    match compact.strip_prefix('0') {
        Some(national) if compact.chars().count() == 10 => format!("{country_code}{national}"),
        _ => compact,
    }
}

/// Calls placed to or from one of the client's numbers, oldest first.
/// Entries without a timestamp sort last.
#[must_use]
pub fn calls_for_client(
    entries: &[CallLogEntry],
    client: &Client,
    country_code: &str,
) -> Vec<CallLogEntry> {
    let phones = client
        .phones
        .iter()
        .map(|phone| normalize_phone(phone, country_code))
        .filter(|phone| !phone.is_empty())
        .collect::<Vec<_>>();
    if phones.is_empty() {
        return Vec::new();
    }

    let mut matched = entries
        .iter()
        .filter(|entry| phones.contains(&entry.number))
        .cloned()
        .collect::<Vec<_>>();
    matched.sort_by_key(|entry| (entry.timestamp.is_none(), entry.timestamp));
    tracing::debug!(client = %client.id, calls = matched.len(), "matched call log entries");
    matched
}
