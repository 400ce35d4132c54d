//! Export command implementation
//!
//! This module implements the default command: back up every configured
//! zone to local files.

use crate::adapters::cloudflare::CloudflareClient;
use crate::config::{load_config, BackupConfig};
use crate::core::export::{ExportEngine, ExportPlan, ExportSummary, FileSink};
use crate::domain::BackupError;
use crate::logging::TracingObserver;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Exit code: run completed without errors
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: run completed but some zones or files failed
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: API client could not be built or the zone listing failed
pub const EXIT_API: i32 = 4;
/// Exit code: unexpected fatal error
pub const EXIT_FATAL: i32 = 5;
/// Exit code: interrupted by SIGINT/SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

/// Arguments for the export command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Only back up the zone with this exact name
    #[arg(long, value_name = "NAME")]
    pub zone: Option<String>,

    /// Dry run mode - fetch and render everything but write no files
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.execute_with_config(config, shutdown_signal).await
    }

    /// Execute the export with an already loaded configuration
    pub async fn execute_with_config(
        &self,
        mut config: BackupConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        let plan = match ExportPlan::derive(&config.export.zones, self.zone.clone()) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if plan.is_empty() {
            tracing::warn!("No export format configured under export.zones");
            println!("Nothing to export: configure export.zones.json, yaml or bind");
            return Ok(EXIT_SUCCESS);
        }

        if config.export.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let client = match CloudflareClient::new(config.cloudflare.clone()) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Cloudflare client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_API);
            }
        };

        let engine = ExportEngine::new(
            plan,
            Arc::new(client),
            Arc::new(FileSink::new()),
            shutdown_signal,
        )
        .with_observer(Arc::new(TracingObserver))
        .with_per_page(config.cloudflare.per_page)
        .with_parallel_zones(config.export.parallel_zones)
        .with_dry_run(config.export.dry_run);

        println!("🚀 Starting export...");
        println!();

        let summary = match engine.execute_export().await {
            Ok(s) => s,
            Err(e @ BackupError::Api(_)) => {
                eprintln!("Export failed: {e}");
                return Ok(EXIT_API);
            }
            Err(e) => {
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print_summary(&summary);

        Ok(exit_code(&summary))
    }
}

/// Map a finished run to the process exit code
pub fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.interrupted {
        EXIT_INTERRUPTED
    } else if summary.is_successful() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Total Zones: {}", summary.total_zones);
    println!("  Exported: {}", summary.zones_exported);
    println!("  Failed: {}", summary.zones_failed);
    println!(
        "  Files {}: {}",
        if summary.dry_run { "Planned" } else { "Written" },
        summary.files_written()
    );
    println!("  Bytes: {}", summary.bytes_written());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if summary.dry_run {
        for file in &summary.files {
            println!("  - {} ({} bytes)", file.path.display(), file.bytes);
        }
        println!();
    }

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }

    if summary.interrupted {
        println!("⚠️  Export interrupted. Re-run the same command to export the remaining zones.");
        tracing::info!("Export interrupted by user signal");
    } else if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}
