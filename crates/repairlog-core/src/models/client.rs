//! Client model

use serde::{Deserialize, Serialize};

/// A shop client, as listed in the clients file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default = "default_client_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub address: String,
}

fn default_client_id() -> String {
    "unknown".to_string()
}
