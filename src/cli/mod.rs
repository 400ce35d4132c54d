//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cfbackup using clap.
//! Running without a subcommand performs the backup.

pub mod commands;

use clap::{Parser, Subcommand};

/// cfbackup - Cloudflare zone backup tool
#[derive(Parser, Debug)]
#[command(name = "cfbackup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long, env = "CFBACKUP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CFBACKUP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Export options
    #[command(flatten)]
    pub export: commands::export::ExportArgs,

    /// Subcommand to execute instead of the export
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file and show the derived export plan
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["cfbackup", "--config", "cfbackup.yaml"]);
        assert_eq!(cli.config, "cfbackup.yaml");
        assert!(cli.command.is_none());
        assert!(cli.export.zone.is_none());
        assert!(!cli.export.dry_run);
    }

    #[test]
    fn test_cli_requires_config() {
        if std::env::var_os("CFBACKUP_CONFIG").is_none() {
            assert!(Cli::try_parse_from(["cfbackup"]).is_err());
        }
    }

    #[test]
    fn test_cli_parse_zone_and_dry_run() {
        let cli = Cli::parse_from([
            "cfbackup",
            "--config",
            "c.yaml",
            "--zone",
            "foo.com",
            "--dry-run",
        ]);
        assert_eq!(cli.export.zone.as_deref(), Some("foo.com"));
        assert!(cli.export.dry_run);
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cfbackup", "-c", "c.yaml", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["cfbackup", "--config", "c.yaml", "validate-config"]);
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
    }
}
