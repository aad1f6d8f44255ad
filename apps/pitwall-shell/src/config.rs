//! # Shell Configuration
//!
//! Display settings for the terminal storefront.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PITWALL_STORE_NAME="Paddock Club"                                  │
//! │     PITWALL_CURRENCY_SYMBOL="€"                                        │
//! │     PITWALL_RENDER_JSON=true                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else PITWALL_CONFIG, else                         │
//! │     ~/.config/pitwall/shell.toml (Linux)                               │
//! │     ~/Library/Application Support/com.pitwall.shell/shell.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "F1 STREETWEAR"
//! currency_symbol = "$"
//! render_json = false
//! show_revision = false
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use pitwall_core::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ShellError, ShellResult};

/// Longest store name the header will print.
const MAX_STORE_NAME_LEN: usize = 60;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shown in the header of every frame.
    pub store_name: String,

    /// Prefix for prices.
    pub currency_symbol: String,

    /// Emit each frame as a JSON snapshot instead of text.
    pub render_json: bool,

    /// Append the store revision to the header (debugging aid).
    pub show_revision: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            store_name: "F1 STREETWEAR".to_string(),
            currency_symbol: "$".to_string(),
            render_json: false,
            show_revision: false,
        }
    }
}

impl ShellConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` (`--config` / `PITWALL_CONFIG`) must
    ///    exist; the platform default is read only if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ShellError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                info!(?path, "Loading shell config from file");
                config = Self::from_file(&path)?;
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    info!(?path, "Loading shell config from file");
                    config = Self::from_file(&path)?;
                } else {
                    debug!("No config file found, using defaults");
                }
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ShellResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// `shell.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "pitwall", "shell").map(|dirs| dirs.config_dir().join("shell.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("PITWALL_STORE_NAME") {
            self.store_name = name;
        }

        if let Ok(symbol) = std::env::var("PITWALL_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(flag) = std::env::var("PITWALL_RENDER_JSON") {
            if let Some(value) = parse_bool(&flag) {
                self.render_json = value;
            }
        }
    }

    pub fn validate(&self) -> ShellResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ShellError::Config("store_name must not be empty".into()));
        }

        if self.store_name.chars().count() > MAX_STORE_NAME_LEN {
            return Err(ShellError::Config(format!(
                "store_name must be at most {} characters",
                MAX_STORE_NAME_LEN
            )));
        }

        if self.currency_symbol.chars().count() > 4 {
            return Err(ShellError::Config(format!(
                "currency_symbol '{}' is too long",
                self.currency_symbol
            )));
        }

        Ok(())
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ```rust
    /// use pitwall_core::Money;
    /// use pitwall_shell::config::ShellConfig;
    ///
    /// let config = ShellConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(12997)), "$129.97");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_currency() {
        let config = ShellConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(3999)), "$39.99");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = ShellConfig {
            currency_symbol: "€".to_string(),
            ..ShellConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(4499)), "€44.99");
    }

    #[test]
    fn test_from_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store_name = \"Paddock Club\"").unwrap();
        writeln!(file, "render_json = true").unwrap();

        let config = ShellConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store_name, "Paddock Club");
        assert!(config.render_json);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store_name = ").unwrap();

        let err = ShellConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ShellError::ConfigParse(_)));
    }

    #[test]
    fn test_load_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, ShellError::Config(_)));
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_validate() {
        assert!(ShellConfig::default().validate().is_ok());

        let blank = ShellConfig {
            store_name: "  ".to_string(),
            ..ShellConfig::default()
        };
        assert!(matches!(blank.validate(), Err(ShellError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ShellConfig {
            show_revision: true,
            ..ShellConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ShellConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
