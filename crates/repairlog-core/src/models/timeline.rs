//! Timeline item model
//!
//! A `TimelineItem` is the common record every source adapter (mail,
//! calendar, time tracking, call log) produces for the per-client timeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::equipment::Equipment;

/// Badge color used for kinds missing from the palette.
pub const DEFAULT_KIND_COLOR: &str = "#95a5a6";

/// What a timeline entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    CallIncoming,
    CallOutgoing,
    CallMissed,
    CallNote,
    InternalNote,
    Quote,
    QuoteAccepted,
    QuoteReply,
    Invoice,
    InvoiceUnpaid,
    Payment,
    Accounting,
    ClientEmail,
    Reply,
    Followup,
    Callback,
    Calendar,
    Timecop,
    Other,
}

impl TimelineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallIncoming => "call_incoming",
            Self::CallOutgoing => "call_outgoing",
            Self::CallMissed => "call_missed",
            Self::CallNote => "call_note",
            Self::InternalNote => "internal_note",
            Self::Quote => "quote",
            Self::QuoteAccepted => "quote_accepted",
            Self::QuoteReply => "quote_reply",
            Self::Invoice => "invoice",
            Self::InvoiceUnpaid => "invoice_unpaid",
            Self::Payment => "payment",
            Self::Accounting => "accounting",
            Self::ClientEmail => "client_email",
            Self::Reply => "reply",
            Self::Followup => "followup",
            Self::Callback => "callback",
            Self::Calendar => "calendar",
            Self::Timecop => "timecop",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CallIncoming => "Incoming call",
            Self::CallOutgoing => "Outgoing call",
            Self::CallMissed => "Missed call",
            Self::CallNote => "Call + note",
            Self::InternalNote => "Internal note",
            Self::Quote => "Quote",
            Self::QuoteAccepted => "Quote accepted",
            Self::QuoteReply => "Quote reply",
            Self::Invoice => "Invoice",
            Self::InvoiceUnpaid => "Unpaid invoice",
            Self::Payment => "Payment",
            Self::Accounting => "Accounting",
            Self::ClientEmail => "Client email",
            Self::Reply => "Reply",
            Self::Followup => "Follow-up",
            Self::Callback => "Callback request",
            Self::Calendar => "Appointment",
            Self::Timecop => "Work time",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::CallIncoming => "#e74c3c",
            Self::CallOutgoing | Self::CallNote => "#e67e22",
            Self::CallMissed => "#c0392b",
            Self::InternalNote => "#f39c12",
            Self::Quote | Self::QuoteReply => "#1abc9c",
            Self::QuoteAccepted => "#16a085",
            Self::Invoice => "#9b59b6",
            Self::InvoiceUnpaid | Self::Accounting => "#8e44ad",
            Self::Payment => "#27ae60",
            Self::ClientEmail => "#3498db",
            Self::Reply => "#7f8c8d",
            Self::Followup => "#2980b9",
            Self::Callback => "#2c3e50",
            Self::Calendar => "#0097a7",
            Self::Timecop => "#ff6f00",
            Self::Other => DEFAULT_KIND_COLOR,
        }
    }

    /// Whether notes of this kind are mined for equipment.
    #[must_use]
    pub const fn extracts_equipment(self) -> bool {
        matches!(self, Self::InternalNote | Self::CallNote)
    }

    const fn default_direction(self) -> Direction {
        match self {
            Self::CallOutgoing | Self::Reply | Self::Quote | Self::Invoice | Self::InvoiceUnpaid => {
                Direction::Out
            }
            Self::Calendar => Direction::Calendar,
            Self::Timecop => Direction::Work,
            _ => Direction::In,
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling direction of a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    Calendar,
    Work,
}

/// Attachment metadata carried by a mail-derived timeline item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Original file name
    pub filename: String,
    /// Name under which the attachment store saved it
    pub saved_name: String,
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    #[serde(default)]
    pub saved_path: String,
}

/// One entry in a client's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Local wall-clock time, timezone stripped
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub type_label: String,
    pub direction: Direction,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub equipments: Vec<Equipment>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub duration_display: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,
}

impl TimelineItem {
    /// Create an item with the kind's default label and direction
    #[must_use]
    pub fn new(
        kind: TimelineKind,
        date: Option<NaiveDateTime>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            type_label: kind.label().to_string(),
            direction: kind.default_direction(),
            subject: subject.into(),
            body: body.into(),
            sender_name: String::new(),
            folder: String::new(),
            equipments: Vec::new(),
            amount: None,
            duration_display: None,
            attachments: Vec::new(),
        }
    }
}
