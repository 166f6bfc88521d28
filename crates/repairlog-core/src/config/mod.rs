//! Shop configuration shared by the extraction and reconciliation passes.
//!
//! Every field has a default matching the shop's current conventions, so an
//! empty JSON object is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::normalize_text_option;

/// Window used to pair a phone-system email with its call-log row.
pub const DEFAULT_CALL_MATCH_WINDOW_SECS: i64 = 300;
/// Lines kept in a cleaned body preview.
pub const DEFAULT_MAX_CLEAN_LINES: usize = 30;
/// Characters of the body inspected when classifying a message.
pub const DEFAULT_MAX_BODY_PREVIEW_CHARS: usize = 300;
/// Details shown per equipment before collapsing into "+N more".
pub const DEFAULT_MAX_DISPLAYED_DETAILS: usize = 3;

const DEFAULT_SHOP_DOMAIN: &str = "geekadomicile";
const DEFAULT_COUNTRY_CODE: &str = "+33";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Tolerance when matching a timeline call against the call log.
    pub call_match_window_secs: i64,
    pub max_clean_lines: usize,
    pub max_body_preview_chars: usize,
    pub max_displayed_details: usize,
    /// Substring identifying the shop's own addresses (e.g. `geekadomicile`).
    pub shop_domain: String,
    /// Mailbox prefixes that receive internal notes and call reports.
    pub internal_mailboxes: Vec<String>,
    /// Sender prefix used by the phone system for incoming-call emails.
    pub phone_system_sender: String,
    /// Prefix replacing the leading `0` of national phone numbers.
    pub country_code: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            call_match_window_secs: DEFAULT_CALL_MATCH_WINDOW_SECS,
            max_clean_lines: DEFAULT_MAX_CLEAN_LINES,
            max_body_preview_chars: DEFAULT_MAX_BODY_PREVIEW_CHARS,
            max_displayed_details: DEFAULT_MAX_DISPLAYED_DETAILS,
            shop_domain: DEFAULT_SHOP_DOMAIN.to_string(),
            internal_mailboxes: vec!["ttt@".to_string(), "cr@".to_string()],
            phone_system_sender: "incall@".to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl ShopConfig {
    /// Parse a configuration from a JSON payload and validate it.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str::<Self>(payload)?.validated()
    }

    /// Normalize and validate a configuration deserialized elsewhere, e.g.
    /// as a section of a larger config file.
    pub fn validated(mut self) -> Result<Self> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    /// Load configuration from disk, falling back to defaults when absent.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No shop config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The shop domain, lowercased, for substring checks on headers.
    pub fn shop_domain_lower(&self) -> String {
        self.shop_domain.to_lowercase()
    }

    fn normalize(&mut self) {
        self.shop_domain = normalize_text_option(Some(self.shop_domain.clone()))
            .unwrap_or_else(|| DEFAULT_SHOP_DOMAIN.to_string());
        self.phone_system_sender = self.phone_system_sender.trim().to_lowercase();
        self.country_code = self.country_code.trim().to_string();
        self.internal_mailboxes = self
            .internal_mailboxes
            .iter()
            .filter_map(|mailbox| normalize_text_option(Some(mailbox.to_lowercase())))
            .collect();
    }

    fn validate(&self) -> Result<()> {
        if self.call_match_window_secs < 0 {
            return Err(Error::Config(format!(
                "call_match_window_secs must not be negative (got {})",
                self.call_match_window_secs
            )));
        }
        if !self.country_code.starts_with('+') {
            return Err(Error::Config(format!(
                "country_code must start with '+' (got '{}')",
                self.country_code
            )));
        }
        Ok(())
    }
}
