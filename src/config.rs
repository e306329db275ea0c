//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` from the content
//! root. User config files are sparse: values merge on top of stock defaults,
//! and unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # content/config.toml — all options optional, defaults shown
//!
//! [site]
//! name = "Portfolio"
//!
//! [contact]
//! from = "Portfolio Contact <noreply@example.com>"
//! to = ["owner@example.com"]
//! subject_prefix = "Portfolio Contact: "
//! provider_url = "https://api.resend.com/emails"
//! api_key_env = "RESEND_API_KEY"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! ```
//!
//! The provider credential itself never lives in the file — only the name of
//! the environment variable it is read from.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity (page titles, email footer).
    pub site: SiteSection,
    /// Contact relay settings: addresses and provider endpoint.
    pub contact: ContactConfig,
    /// HTTP server settings for `serve`.
    pub server: ServerConfig,
}

impl SiteConfig {
    /// Validate config values after merging.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if !self.contact.provider_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "contact.provider_url must be an http(s) URL".into(),
            ));
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not a valid socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Appears in document titles and in the relay's email footer.
    pub name: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
        }
    }
}

/// Contact relay settings.
///
/// `from`/`to` are provider-facing addresses; the form submitter's address
/// only ever appears as the reply-to header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Sender identity registered with the email provider.
    pub from: String,
    /// Recipients of contact form submissions.
    pub to: Vec<String>,
    /// Prepended to the submitter's subject line.
    pub subject_prefix: String,
    /// Provider endpoint receiving the outbound POST.
    pub provider_url: String,
    /// Name of the environment variable holding the provider credential.
    pub api_key_env: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            from: "Portfolio Contact <noreply@example.com>".to_string(),
            to: vec!["owner@example.com".to_string()],
            subject_prefix: "Portfolio Contact: ".to_string(),
            provider_url: "https://api.resend.com/emails".to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address `serve` binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(content_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match load_raw_config(content_dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Appears in document titles and in the contact email footer.
name = "Portfolio"

# ---------------------------------------------------------------------------
# Contact relay
# ---------------------------------------------------------------------------
[contact]
# Sender identity registered with the email provider.
from = "Portfolio Contact <noreply@example.com>"

# Recipients of contact form submissions.
to = ["owner@example.com"]

# Prepended to the submitter's subject line.
subject_prefix = "Portfolio Contact: "

# Provider endpoint receiving the outbound POST.
provider_url = "https://api.resend.com/emails"

# Name of the environment variable holding the provider API key.
# The key itself never lives in this file.
api_key_env = "RESEND_API_KEY"

# ---------------------------------------------------------------------------
# HTTP server (serve command)
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1:8080"
"##
}
