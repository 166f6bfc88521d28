//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use repairlog_core::util::normalize_text_option;
use repairlog_core::ShopConfig;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "repairlog";
const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "REPAIRLOG_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Shop conventions used by extraction and reconciliation
    #[serde(default)]
    pub shop: ShopConfig,
    /// Default Android call log export
    #[serde(default)]
    pub call_log: Option<PathBuf>,
    /// JSON array of clients ({id, name, phones, emails, address})
    #[serde(default)]
    pub clients: Option<PathBuf>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Config file to use: `--config`, then `REPAIRLOG_CONFIG`, then the
/// per-user config directory.
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = normalize_text_option(env_value) {
        return Some(PathBuf::from(path));
    }
    default_config_path()
}

impl CliConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        match resolve_config_path(explicit, std::env::var(CONFIG_ENV_VAR).ok()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!("No CLI config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config
            .normalize(path.parent())
            .map_err(|error| format!("Invalid config at {}: {}", path.display(), error))
    }

    /// Trim paths, drop empty ones and resolve relative paths against the
    /// config file's directory.
    fn normalize(mut self, base_dir: Option<&Path>) -> repairlog_core::Result<Self> {
        self.shop = self.shop.validated()?;
        self.call_log = normalize_path(self.call_log, base_dir);
        self.clients = normalize_path(self.clients, base_dir);
        Ok(self)
    }
}

fn normalize_path(path: Option<PathBuf>, base_dir: Option<&Path>) -> Option<PathBuf> {
    let path = normalize_text_option(path.map(|path| path.to_string_lossy().into_owned()))?;
    let path = PathBuf::from(path);
    match base_dir {
        Some(base) if path.is_relative() => Some(base.join(path)),
        _ => Some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_env() {
        let explicit = PathBuf::from("/tmp/explicit.json");
        assert_eq!(
            resolve_config_path(Some(&explicit), Some("/tmp/env.json".to_string())),
            Some(explicit)
        );
        assert_eq!(
            resolve_config_path(None, Some(" /tmp/env.json ".to_string())),
            Some(PathBuf::from("/tmp/env.json"))
        );
    }

    #[test]
    fn blank_env_value_falls_back_to_default_location() {
        assert_eq!(
            resolve_config_path(None, Some("  ".to_string())),
            default_config_path()
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from_path(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"call_log": "calls.json", "clients": " ", "shop": {"call_match_window_secs": 120}}"#,
        )
        .unwrap();

        let config = CliConfig::load_from_path(&path).unwrap();
        assert_eq!(config.call_log, Some(dir.path().join("calls.json")));
        assert_eq!(config.clients, None);
        assert_eq!(config.shop.call_match_window_secs, 120);
    }

    #[test]
    fn invalid_shop_section_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"shop": {"country_code": "33"}}"#).unwrap();

        let error = CliConfig::load_from_path(&path).unwrap_err();
        assert!(error.contains("country_code"));
    }
}
