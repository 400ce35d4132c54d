// cfbackup - Cloudflare zone backup tool
// Copyright (c) 2025 cfbackup Contributors
// Licensed under the MIT License

//! # cfbackup - Cloudflare zone backup
//!
//! cfbackup exports the configuration of every zone in a Cloudflare account
//! (DNS records, firewall rules, page rules, settings, the BIND zone file)
//! into local, optionally gzip-compressed JSON, YAML and BIND files.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Walking** paginated API listings into complete in-memory collections
//! - **Collecting** the configured resource categories of each zone
//! - **Writing** one file per zone and format, `{zone_name}-{zone_id}.{ext}[.gz]`
//! - **Reporting** per-zone outcomes without aborting on a single failure
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export engine (pagination, collection, sink, orchestration)
//! - [`adapters`] - Cloudflare API client
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfbackup::adapters::cloudflare::CloudflareClient;
//! use cfbackup::config::load_config;
//! use cfbackup::core::export::{ExportEngine, ExportPlan, FileSink};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cfbackup.yaml")?;
//!     let plan = ExportPlan::derive(&config.export.zones, None)?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let engine = ExportEngine::new(
//!         plan,
//!         Arc::new(CloudflareClient::new(config.cloudflare.clone())?),
//!         Arc::new(FileSink::new()),
//!         shutdown_rx,
//!     );
//!
//!     let summary = engine.execute_export().await?;
//!     println!("Exported {} zones", summary.zones_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error type is
//! [`domain::BackupError`]:
//!
//! ```rust,no_run
//! use cfbackup::domain::BackupError;
//!
//! fn example() -> Result<(), BackupError> {
//!     let config = cfbackup::config::load_config("cfbackup.yaml")?;
//!     println!("{}", config.cloudflare.base_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
