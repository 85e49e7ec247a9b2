//! Configuration file parser for ~/.config/newsdesk/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged as warnings, since they are usually typos.
use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::view::{ImagePolicy, DEFAULT_IMAGE_VARIANT};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the news API (scheme + host, optional path prefix).
    pub api_base_url: String,

    /// Per-request timeout in seconds. 0 falls back to the default.
    pub request_timeout_secs: u64,

    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Try `image.srcset[image_variant_index]` before the top-level image URL.
    pub use_image_variants: bool,

    /// srcset index tried first when `use_image_variants` is on.
    pub image_variant_index: usize,

    /// Below this terminal width the tab bar and bookmarks side panel are hidden.
    pub compact_width: u16,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: "dark".to_string(),
            use_image_variants: true,
            image_variant_index: DEFAULT_IMAGE_VARIANT,
            compact_width: 90,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "api_base_url",
        "request_timeout_secs",
        "theme",
        "use_image_variants",
        "image_variant_index",
        "compact_width",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            api_base_url = %config.api_base_url,
            theme = %config.theme,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    pub fn image_policy(&self) -> ImagePolicy {
        ImagePolicy {
            variant_index: self.use_image_variants.then_some(self.image_variant_index),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("newsdesk_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://news-api-fs.vercel.app");
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.image_policy().variant_index, Some(5));
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/newsdesk_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        let config = Config::parse("  \n \n").unwrap();
        assert_eq!(config.compact_width, 90);
    }

    #[test]
    fn test_full_config_from_file() {
        let path = temp_config(
            "full",
            r#"
api_base_url = "http://localhost:8080"
request_timeout_secs = 5
theme = "light"
use_image_variants = false
image_variant_index = 2
compact_width = 120

[keybindings]
quit = "Ctrl+q"
bookmark = "m"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.theme, "light");
        assert_eq!(config.image_policy().variant_index, None);
        assert_eq!(config.compact_width, 120);
        assert_eq!(
            config.keybindings.get("bookmark").map(String::as_str),
            Some("m")
        );

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse("image_variant_index = 1\n").unwrap();
        assert_eq!(config.image_policy().variant_index, Some(1));
        assert_eq!(config.api_base_url, "https://news-api-fs.vercel.app");
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = Config::parse("request_timeout_secs = 0\n").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::parse("compact_width = \"wide\"\n").is_err());
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::parse("theme = \"dark\"\nrefresh_interval = 5\n").unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = temp_config("too_large", &"#".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
