//! Call log model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timeline::{Direction, TimelineKind};

/// Direction/outcome of a phone call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
}

impl CallType {
    /// Map an Android call log `type` code.
    ///
    /// Codes beyond 1-3 (voicemail, rejected, blocked) count as missed.
    #[must_use]
    pub const fn from_android_code(code: i64) -> Self {
        match code {
            1 => Self::Incoming,
            2 => Self::Outgoing,
            _ => Self::Missed,
        }
    }

    #[must_use]
    pub const fn timeline_kind(self) -> TimelineKind {
        match self {
            Self::Incoming => TimelineKind::CallIncoming,
            Self::Outgoing => TimelineKind::CallOutgoing,
            Self::Missed => TimelineKind::CallMissed,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Outgoing => Direction::Out,
            Self::Incoming | Self::Missed => Direction::In,
        }
    }
}

/// One row of the phone system's call log export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Canonical international number, e.g. `+33612345678`
    pub number: String,
    pub display_name: String,
    pub duration_secs: u64,
    /// Local wall-clock time of the call
    pub timestamp: Option<NaiveDateTime>,
    pub call_type: CallType,
    pub location: String,
}

impl CallLogEntry {
    /// Format the duration as `45s`, `2min05s`, `1h00` or `1h05min`
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_call_duration(self.duration_secs)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.call_type.timeline_kind().label()
    }
}

pub(crate) fn format_call_duration(duration_secs: u64) -> String {
    if duration_secs == 0 {
        return "0s".to_string();
    }
    let total_min = duration_secs / 60;
    let secs = duration_secs % 60;
    if total_min >= 60 {
        let hours = total_min / 60;
        let minutes = total_min % 60;
        if minutes > 0 {
            format!("{hours}h{minutes:02}min")
        } else {
            format!("{hours}h00")
        }
    } else if total_min > 0 {
        if secs > 0 {
            format!("{total_min}min{secs:02}s")
        } else {
            format!("{total_min}min")
        }
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display_units() {
        assert_eq!(format_call_duration(0), "0s");
        assert_eq!(format_call_duration(45), "45s");
        assert_eq!(format_call_duration(120), "2min");
        assert_eq!(format_call_duration(125), "2min05s");
        assert_eq!(format_call_duration(3600), "1h00");
        assert_eq!(format_call_duration(3900), "1h05min");
    }

    #[test]
    fn unknown_android_codes_are_missed() {
        assert_eq!(CallType::from_android_code(1), CallType::Incoming);
        assert_eq!(CallType::from_android_code(2), CallType::Outgoing);
        assert_eq!(CallType::from_android_code(3), CallType::Missed);
        assert_eq!(CallType::from_android_code(5), CallType::Missed);
    }

    #[test]
    fn outgoing_calls_point_out() {
        assert_eq!(CallType::Outgoing.direction(), Direction::Out);
        assert_eq!(CallType::Missed.direction(), Direction::In);
        assert_eq!(
            CallType::Missed.timeline_kind(),
            TimelineKind::CallMissed
        );
    }
}
