//! Configuration schema types
//!
//! This module defines the configuration structure for cfbackup. The same
//! structs are read from YAML (the default) or TOML.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main cfbackup configuration
///
/// This is the root configuration structure that maps to the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Cloudflare API client settings
    pub cloudflare: CloudflareConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BackupConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.cloudflare.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for the API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Cloudflare API client configuration
///
/// Either `token` (API token, sent as a bearer token) or `email` + `key`
/// (global API key) must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareConfig {
    /// Account email, used together with `key`
    #[serde(default)]
    pub email: Option<String>,

    /// Global API key
    #[serde(default)]
    pub key: Option<SecretString>,

    /// Scoped API token
    #[serde(default)]
    pub token: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size requested from paginated endpoints
    ///
    /// The zone listing is capped at 50 per page regardless.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CloudflareConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("cloudflare.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("cloudflare.base_url must start with http:// or https://".to_string());
        }

        let has_token = self
            .token
            .as_ref()
            .map(|t| !t.expose_secret().is_empty())
            .unwrap_or(false);
        let has_key = self
            .key
            .as_ref()
            .map(|k| !k.expose_secret().is_empty())
            .unwrap_or(false);
        let has_email = self
            .email
            .as_ref()
            .map(|e| !e.trim().is_empty())
            .unwrap_or(false);

        if !has_token && !has_key {
            return Err(
                "cloudflare.token or cloudflare.email + cloudflare.key must be provided"
                    .to_string(),
            );
        }

        if !has_token && has_key && !has_email {
            return Err("cloudflare.email is required when using cloudflare.key".to_string());
        }

        if !(5..=1000).contains(&self.per_page) {
            return Err(format!(
                "cloudflare.per_page must be between 5 and 1000, got {}",
                self.per_page
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("cloudflare.timeout_seconds must be > 0".to_string());
        }

        if self.retry.max_retries == 0 || self.retry.max_retries > 10 {
            return Err(format!(
                "cloudflare.retry.max_retries must be between 1 and 10, got {}",
                self.retry.max_retries
            ));
        }

        Ok(())
    }
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            email: None,
            key: None,
            token: None,
            base_url: default_base_url(),
            per_page: default_per_page(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Per-zone export targets and optional resource categories
    #[serde(default)]
    pub zones: ZonesExportConfig,

    /// Number of zones processed concurrently (default: 1)
    #[serde(default = "default_parallel_zones")]
    pub parallel_zones: usize,

    /// Dry run mode - fetch and serialize everything but skip file writes
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.parallel_zones == 0 || self.parallel_zones > 32 {
            return Err(format!(
                "export.parallel_zones must be between 1 and 32, got {}",
                self.parallel_zones
            ));
        }

        self.zones.validate()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            zones: ZonesExportConfig::default(),
            parallel_zones: default_parallel_zones(),
            dry_run: false,
        }
    }
}

/// `export.zones` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonesExportConfig {
    /// JSON output target
    #[serde(default)]
    pub json: Option<FormatTargetConfig>,

    /// YAML output target
    #[serde(default)]
    pub yaml: Option<FormatTargetConfig>,

    /// BIND zone file output target
    #[serde(default)]
    pub bind: Option<FormatTargetConfig>,

    /// Optional resource categories added to the structured documents
    #[serde(default)]
    pub extra: ExtraConfig,
}

impl ZonesExportConfig {
    fn validate(&self) -> Result<(), String> {
        for (format, target) in [("json", &self.json), ("yaml", &self.yaml), ("bind", &self.bind)]
        {
            if let Some(target) = target {
                target.validate(format)?;
            }
        }
        Ok(())
    }
}

/// Output target for one format
///
/// Accepts either a bare path (`json: /backups/json`) or a table with
/// `path`, `file_ext` and `compress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FormatTargetConfig {
    /// Shorthand: only the output directory
    Path(String),

    /// Full form
    Detailed {
        /// Output directory; the format is inactive without it
        #[serde(default)]
        path: Option<String>,

        /// File extension, defaults to the format name
        #[serde(default)]
        file_ext: Option<String>,

        /// Gzip the output, defaults to true
        #[serde(default)]
        compress: Option<bool>,
    },
}

impl FormatTargetConfig {
    /// Output directory, if configured
    pub fn path(&self) -> Option<&str> {
        match self {
            FormatTargetConfig::Path(path) => Some(path.as_str()),
            FormatTargetConfig::Detailed { path, .. } => path.as_deref(),
        }
    }

    /// Configured file extension
    pub fn file_ext(&self) -> Option<&str> {
        match self {
            FormatTargetConfig::Path(_) => None,
            FormatTargetConfig::Detailed { file_ext, .. } => file_ext.as_deref(),
        }
    }

    /// Configured compression flag
    pub fn compress(&self) -> Option<bool> {
        match self {
            FormatTargetConfig::Path(_) => None,
            FormatTargetConfig::Detailed { compress, .. } => *compress,
        }
    }

    fn validate(&self, format: &str) -> Result<(), String> {
        if let Some(path) = self.path() {
            if path.trim().is_empty() {
                return Err(format!("export.zones.{format}.path cannot be empty"));
            }
        }

        if let Some(ext) = self.file_ext() {
            let ext = ext.trim_start_matches('.');
            if ext.is_empty() {
                return Err(format!("export.zones.{format}.file_ext cannot be empty"));
            }
            if ext.contains('/') || ext.contains('\\') {
                return Err(format!(
                    "export.zones.{format}.file_ext cannot contain path separators"
                ));
            }
        }

        Ok(())
    }
}

/// `export.zones.extra` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtraConfig {
    #[serde(default)]
    pub keyless_certificates: bool,

    #[serde(default)]
    pub custom_pages: bool,

    #[serde(default)]
    pub pagerules: bool,

    #[serde(default)]
    pub settings: bool,

    #[serde(default)]
    pub firewall: FirewallExtraConfig,
}

/// `export.zones.extra.firewall` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallExtraConfig {
    #[serde(default)]
    pub access_rules: bool,

    #[serde(default)]
    pub ua_rules: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_per_page() -> u32 {
    50
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_parallel_zones() -> usize {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
