//! Note model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A technician note: an internal mail or a call note written after a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Source identifier (mail message id, file name, ...)
    #[serde(default)]
    pub id: String,
    /// When the note was written, local wall-clock time
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub subject: String,
    /// Plain text content, indentation preserved
    #[serde(default)]
    pub body: String,
}

impl Note {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        date: Option<NaiveDateTime>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            subject: subject.into(),
            body: body.into(),
        }
    }
}
