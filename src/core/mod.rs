//! Core business logic for cfbackup.
//!
//! # Modules
//!
//! - [`export`] - Pagination, zone collection, output writing and orchestration
//!
//! # Export Workflow
//!
//! 1. **Plan**: Derive the active formats and extra categories from configuration
//! 2. **List**: Walk the zone listing, optionally filtered by name
//! 3. **Collect**: Fetch each zone's DNS records, extras and BIND zone file
//! 4. **Render**: Serialize the zone backup once per active format
//! 5. **Write**: Gzip if configured and write `{zone_name}-{zone_id}.{ext}[.gz]`
//! 6. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use cfbackup::adapters::cloudflare::CloudflareClient;
//! use cfbackup::config::load_config;
//! use cfbackup::core::export::{ExportEngine, ExportPlan, FileSink};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cfbackup.yaml")?;
//! let plan = ExportPlan::derive(&config.export.zones, Some("example.com".to_string()))?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let engine = ExportEngine::new(
//!     plan,
//!     Arc::new(CloudflareClient::new(config.cloudflare.clone())?),
//!     Arc::new(FileSink::new()),
//!     shutdown_rx,
//! );
//!
//! let summary = engine.execute_export().await?;
//!
//! println!("Zones: {}", summary.total_zones);
//! println!("Files: {}", summary.files_written());
//! println!("Failed: {}", summary.zones_failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
