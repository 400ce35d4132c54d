//! Validate config command implementation
//!
//! This module implements the `validate-config` command: load and validate
//! the configuration file, then show the export plan derived from it.

use super::export::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config, BackupConfig};
use crate::core::export::ExportPlan;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Zone filter to apply when deriving the plan
    #[arg(long, value_name = "NAME")]
    pub zone: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let plan = match ExportPlan::derive(&config.export.zones, self.zone.clone()) {
            Ok(plan) => plan,
            Err(e) => {
                println!("❌ Invalid export plan");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        for line in describe(&config, &plan) {
            println!("{line}");
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}

/// Human-readable configuration and plan summary; never includes secrets
fn describe(config: &BackupConfig, plan: &ExportPlan) -> Vec<String> {
    let auth = if config.cloudflare.token.is_some() {
        "API token".to_string()
    } else {
        format!(
            "API key ({})",
            config.cloudflare.email.as_deref().unwrap_or("no email")
        )
    };

    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  API Base URL: {}", config.cloudflare.base_url),
        format!("  Authentication: {auth}"),
        format!("  Page Size: {}", config.cloudflare.per_page),
        format!("  Parallel Zones: {}", config.export.parallel_zones),
        format!("  Dry Run: {}", config.export.dry_run),
        format!(
            "  Zone Filter: {}",
            plan.zone_filter.as_deref().unwrap_or("all zones")
        ),
        "Export Plan:".to_string(),
    ];

    if plan.is_empty() {
        lines.push("  (no output format configured, nothing will be exported)".to_string());
    }
    for (format, target) in plan.active_formats() {
        lines.push(format!(
            "  {format}: {}/{{zone_name}}-{{zone_id}}.{}{}",
            target.path,
            target.file_ext,
            if target.compress { ".gz" } else { "" }
        ));
    }
    if !plan.categories.is_empty() {
        let categories: Vec<&str> = plan.categories.iter().map(|c| c.as_str()).collect();
        lines.push(format!("  Extra Categories: {}", categories.join(", ")));
    }

    lines
}
