//! Configuration management for cfbackup.
//!
//! # Overview
//!
//! cfbackup reads a YAML configuration file (TOML is accepted for files
//! ending in `.toml`) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CFBACKUP_*` environment overrides
//! - Default values for optional settings
//! - Validation before any network call is made
//!
//! # Example Configuration
//!
//! ```yaml
//! cloudflare:
//!   token: ${CLOUDFLARE_API_TOKEN}
//!
//! export:
//!   parallel_zones: 4
//!   zones:
//!     json:
//!       path: /var/backups/cloudflare/json
//!     yaml:
//!       path: /var/backups/cloudflare/{zone_name}
//!       file_ext: yml
//!       compress: false
//!     bind: /var/backups/cloudflare/bind
//!     extra:
//!       pagerules: true
//!       settings: true
//!       firewall:
//!         access_rules: true
//! ```
//!
//! # Sections
//!
//! - [`ApplicationConfig`] - Log level
//! - [`CloudflareConfig`] - API credentials, base URL, page size, retries
//! - [`ExportConfig`] - Output targets, extra categories, parallelism, dry run
//! - [`LoggingConfig`] - Local file logging

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BackupConfig, CloudflareConfig, ExportConfig, ExtraConfig,
    FirewallExtraConfig, FormatTargetConfig, LoggingConfig, RetryConfig, ZonesExportConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
