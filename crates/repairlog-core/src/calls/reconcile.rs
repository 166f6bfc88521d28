//! Reconciliation of phone-system call emails with the phone's call log.
//!
//! The phone system mails the shop on every incoming call, but those mails
//! carry no duration, and outgoing or missed calls are never mailed. The
//! call log fills both gaps.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{CallLogEntry, TimelineItem, TimelineKind};

static SUBJECT_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d{10,}").expect("valid subject phone pattern"));

/// Folder name given to items created from the call log.
pub const CALL_LOG_FOLDER: &str = "call_log";

/// Outcome of [`reconcile_calls`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Timeline calls paired with a call log entry
    pub enriched: usize,
    /// One item per call log entry left unpaired, in call log order
    pub new_items: Vec<TimelineItem>,
}

/// Pair incoming-call timeline items with call log entries and turn the
/// remaining entries into new timeline items.
///
/// Items are visited in order. Each one takes the closest unclaimed entry
/// for the same number within `window_secs`, first entry winning ties. An
/// entry is claimed at most once.
pub fn reconcile_calls(
    items: &mut [TimelineItem],
    calls: &[CallLogEntry],
    window_secs: i64,
) -> Reconciliation {
    let window_ms = window_secs.saturating_mul(1000);
    let mut claimed = vec![false; calls.len()];
    let mut enriched = 0;

    for item in items.iter_mut().filter(|item| item.kind == TimelineKind::CallIncoming) {
        let Some(item_date) = item.date else {
            continue;
        };
        let Some(phone) = SUBJECT_PHONE.find(&item.subject) else {
            continue;
        };
        let phone = phone.as_str();

        let mut best: Option<(usize, i64)> = None;
        for (index, call) in calls.iter().enumerate() {
            if claimed[index] || call.number != phone {
                continue;
            }
            let Some(timestamp) = call.timestamp else {
                continue;
            };
            let delta = (item_date - timestamp).num_milliseconds().abs();
            if delta <= window_ms && best.is_none_or(|(_, best_delta)| delta < best_delta) {
                best = Some((index, delta));
            }
        }

        if let Some((index, _)) = best {
            claimed[index] = true;
            enriched += 1;
            let call = &calls[index];
            if call.duration_secs > 0 {
                item.duration_display = Some(call.duration_display());
            }
        }
    }

    let new_items = calls
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(call, _)| call_log_item(call))
        .collect::<Vec<_>>();

    tracing::info!(
        enriched,
        added = new_items.len(),
        "reconciled call log with timeline"
    );
    Reconciliation { enriched, new_items }
}

/// Timeline item standing for a call known only from the call log.
#[must_use]
pub fn call_log_item(call: &CallLogEntry) -> TimelineItem {
    let label = call.label();
    let mut body_lines = Vec::with_capacity(2);
    if call.duration_secs > 0 {
        body_lines.push(format!("Duree: {}", call.duration_display()));
    }
    body_lines.push(call.number.clone());

    let mut item = TimelineItem::new(
        call.call_type.timeline_kind(),
        call.timestamp,
        format!("{label} {}", call.number),
        body_lines.join("\n"),
    );
    item.direction = call.call_type.direction();
    item.sender_name = if call.display_name.is_empty() {
        call.number.clone()
    } else {
        call.display_name.clone()
    };
    item.folder = CALL_LOG_FOLDER.to_string();
    item.duration_display = (call.duration_secs > 0).then(|| call.duration_display());
    item
}
