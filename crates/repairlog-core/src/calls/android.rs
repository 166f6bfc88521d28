//! Android call log export (a JSON array of content-provider rows).
//!
//! Exports differ between phones and backup apps: numbers may be strings
//! or integers, fields may be missing or null. Every field is read
//! leniently; a record is only skipped when it is not a JSON object.

use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::normalize_phone;
use crate::error::{Error, Result};
use crate::models::{CallLogEntry, CallType};

const ANDROID_INCOMING_TYPE: i64 = 1;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCallRecord {
    #[serde(deserialize_with = "lenient_string")]
    number: String,
    #[serde(deserialize_with = "lenient_string")]
    normalized_number: String,
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_string")]
    display_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    duration: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    date: Option<i64>,
    #[serde(rename = "type", deserialize_with = "lenient_i64")]
    call_type: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    geocoded_location: String,
}

/// Accept a string or a number; anything else reads as empty.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        _ => String::new(),
    })
}

/// Accept an integer or a numeric string; anything else reads as absent.
#[allow(clippy::cast_possible_truncation)]
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(value) => value
            .as_i64()
            // some exporters write durations as 12.0
            .or_else(|| value.as_f64().map(|float| float as i64)),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    })
}

/// Convert epoch milliseconds to local wall-clock time. Zero reads as absent.
pub(crate) fn local_from_epoch_ms(epoch_ms: i64) -> Option<NaiveDateTime> {
    if epoch_ms == 0 {
        return None;
    }
    DateTime::from_timestamp_millis(epoch_ms).map(|utc| utc.with_timezone(&Local).naive_local())
}

fn first_non_empty(preferred: String, fallback: String) -> String {
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    }
}

impl RawCallRecord {
    fn into_entry(self, country_code: &str) -> CallLogEntry {
        let number = first_non_empty(self.normalized_number, self.number);
        CallLogEntry {
            number: normalize_phone(&number, country_code),
            display_name: first_non_empty(self.display_name, self.name),
            duration_secs: self
                .duration
                .and_then(|secs| u64::try_from(secs).ok())
                .unwrap_or(0),
            timestamp: self.date.and_then(local_from_epoch_ms),
            call_type: CallType::from_android_code(
                self.call_type.filter(|code| *code != 0).unwrap_or(ANDROID_INCOMING_TYPE),
            ),
            location: self.geocoded_location,
        }
    }
}

/// Parse an Android call log export.
///
/// Fails only when the payload is not a JSON array.
pub fn parse_call_log(payload: &str, country_code: &str) -> Result<Vec<CallLogEntry>> {
    let records = match serde_json::from_str::<Value>(payload)? {
        Value::Array(records) => records,
        other => {
            return Err(Error::InvalidInput(format!(
                "call log must be a JSON array, got {}",
                json_type_name(&other)
            )));
        }
    };

    let total = records.len();
    let mut entries = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(index, "skipping call log record that is not an object");
            continue;
        }
        match RawCallRecord::deserialize(record) {
            Ok(raw) => entries.push(raw.into_entry(country_code)),
            Err(error) => tracing::warn!(index, %error, "skipping malformed call log record"),
        }
    }

    if entries.len() < total {
        tracing::warn!(
            parsed = entries.len(),
            skipped = total - entries.len(),
            "call log parsed with skipped records"
        );
    }
    tracing::debug!(entries = entries.len(), "loaded call log");
    Ok(entries)
}

/// Read and parse a call log export from disk.
pub fn load_call_log(path: &Path, country_code: &str) -> Result<Vec<CallLogEntry>> {
    let raw = std::fs::read_to_string(path)?;
    parse_call_log(&raw, country_code)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
