use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration loaded from TOML.
///
/// Each monitoring variant carries its own full parameter set (threshold,
/// interval, mail relay), so the two pipelines can be tuned and routed
/// independently. Every field has a default; an empty file is a valid
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub aggregate: AggregateConfig,
    #[serde(default)]
    pub single_process: SingleProcessConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Parameters of the aggregate-by-tag monitoring variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    #[serde(default = "default_watch_tag")]
    pub watch_tag: String,
    #[serde(default = "default_aggregate_threshold")]
    pub threshold_mb: f64,
    #[serde(default = "default_aggregate_interval")]
    pub interval_minutes: u64,
    #[serde(flatten)]
    pub mail: MailConfig,
}

/// Parameters of the single-process (own memory) monitoring variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleProcessConfig {
    #[serde(default = "default_single_threshold")]
    pub threshold_mb: f64,
    #[serde(default = "default_single_interval")]
    pub interval_minutes: u64,
    #[serde(flatten)]
    pub mail: MailConfig,
}

/// Outbound mail parameters, flattened into each variant section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_email_from")]
    pub email_from: String,
    #[serde(default = "default_email_to")]
    pub email_to: String,
}

impl MailConfig {
    /// `host:port` form used in report output.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.smtp_server, self.smtp_port)
    }
}

/// Relay database location and retention (tilde-expanded at point of use).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_path")]
    pub path: String,
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u64,
}

// --- Defaults ---

fn default_watch_tag() -> String {
    "memsentry-worker".into()
}

const fn default_aggregate_threshold() -> f64 {
    1300.0
}

const fn default_aggregate_interval() -> u64 {
    30
}

const fn default_single_threshold() -> f64 {
    350.0
}

const fn default_single_interval() -> u64 {
    60
}

fn default_smtp_server() -> String {
    "localhost".into()
}

const fn default_smtp_port() -> u16 {
    587
}

fn default_email_from() -> String {
    "memsentry@localhost".into()
}

fn default_email_to() -> String {
    "root@localhost".into()
}

fn default_relay_path() -> String {
    "~/.local/share/memsentry/relay.db".into()
}

const fn default_retention_hours() -> u64 {
    24
}

// --- Default impls ---

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            watch_tag: default_watch_tag(),
            threshold_mb: default_aggregate_threshold(),
            interval_minutes: default_aggregate_interval(),
            mail: MailConfig::default(),
        }
    }
}

impl Default for SingleProcessConfig {
    fn default() -> Self {
        Self {
            threshold_mb: default_single_threshold(),
            interval_minutes: default_single_interval(),
            mail: MailConfig::default(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            email_from: default_email_from(),
            email_to: default_email_to(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            path: default_relay_path(),
            retention_hours: default_retention_hours(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("memsentry").join("config.toml"))
    }
}
