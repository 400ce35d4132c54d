//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use cfbackup::config::{load_config, FormatTargetConfig};
use cfbackup::core::export::{ExportPlan, FormatTarget};
use cfbackup::domain::{BackupError, ResourceCategory};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "CFBACKUP_APPLICATION_LOG_LEVEL",
        "CFBACKUP_CLOUDFLARE_EMAIL",
        "CFBACKUP_CLOUDFLARE_KEY",
        "CFBACKUP_CLOUDFLARE_TOKEN",
        "CFBACKUP_CLOUDFLARE_BASE_URL",
        "CFBACKUP_CLOUDFLARE_PER_PAGE",
        "CFBACKUP_EXPORT_PARALLEL_ZONES",
        "CFBACKUP_EXPORT_DRY_RUN",
        "CFBACKUP_LOGGING_LOCAL_ENABLED",
        "CFBACKUP_LOGGING_LOCAL_PATH",
        "TEST_CF_TOKEN",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_yaml_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        ".yaml",
        r#"
application:
  log_level: debug

cloudflare:
  email: admin@example.com
  key: global-api-key
  per_page: 100
  retry:
    max_retries: 5

export:
  parallel_zones: 4
  zones:
    json: /backups/json
    yaml:
      path: /backups/yaml
      file_ext: yml
      compress: false
    bind:
      path: /backups/bind/{zone_name}
      file_ext: db
    extra:
      pagerules: true
      settings: true
      firewall:
        access_rules: true

logging:
  local_enabled: false
  local_rotation: hourly
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.cloudflare.email.as_deref(), Some("admin@example.com"));
    assert_eq!(
        config.cloudflare.key.as_ref().unwrap().expose_secret().as_ref(),
        "global-api-key"
    );
    assert!(config.cloudflare.token.is_none());
    assert_eq!(config.cloudflare.per_page, 100);
    assert_eq!(config.cloudflare.retry.max_retries, 5);
    assert_eq!(config.export.parallel_zones, 4);
    assert_eq!(
        config.export.zones.json,
        Some(FormatTargetConfig::Path("/backups/json".to_string()))
    );

    let plan = ExportPlan::derive(&config.export.zones, None).unwrap();
    assert_eq!(plan.json, Some(FormatTarget::new("/backups/json", "json", true)));
    assert_eq!(plan.yaml, Some(FormatTarget::new("/backups/yaml", "yml", false)));
    assert_eq!(
        plan.bind,
        Some(FormatTarget::new("/backups/bind/{zone_name}", "db", true))
    );
    assert_eq!(
        plan.categories.into_iter().collect::<Vec<_>>(),
        vec![
            ResourceCategory::PageRules,
            ResourceCategory::Settings,
            ResourceCategory::FirewallAccessRules
        ]
    );
}

#[test]
fn test_load_toml_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        ".toml",
        r#"
[cloudflare]
token = "toml-token"

[export.zones.json]
path = "/backups"
compress = false
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert!(config.cloudflare.token.is_some());

    let plan = ExportPlan::derive(&config.export.zones, None).unwrap();
    assert_eq!(plan.json, Some(FormatTarget::new("/backups", "json", false)));
    assert!(plan.yaml.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CF_TOKEN", "from-env");

    let file = write_config(
        ".yaml",
        "cloudflare:\n  token: \"${TEST_CF_TOKEN}\"\n# key: \"${NOT_SET_ANYWHERE}\"\n",
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.cloudflare.token.as_ref().unwrap().expose_secret().as_ref(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(".yaml", "cloudflare:\n  token: \"${TEST_CF_TOKEN}\"\n");

    match load_config(file.path()) {
        Err(BackupError::Configuration(msg)) => assert!(msg.contains("TEST_CF_TOKEN")),
        other => panic!("Expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CFBACKUP_CLOUDFLARE_TOKEN", "override-token");
    std::env::set_var("CFBACKUP_EXPORT_PARALLEL_ZONES", "8");
    std::env::set_var("CFBACKUP_EXPORT_DRY_RUN", "true");

    let file = write_config(".yaml", "cloudflare:\n  per_page: 50\n");

    let config = load_config(file.path()).unwrap();
    assert!(config.cloudflare.token.is_some());
    assert_eq!(config.export.parallel_zones, 8);
    assert!(config.export.dry_run);

    cleanup_env_vars();
}

#[test]
fn test_validation_failures() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        // no credentials
        "cloudflare:\n  per_page: 50\n",
        // email without key
        "cloudflare:\n  email: a@example.com\n",
        // page size out of range
        "cloudflare:\n  token: t\n  per_page: 2\n",
        // too many parallel zones
        "cloudflare:\n  token: t\nexport:\n  parallel_zones: 64\n",
        // empty output path
        "cloudflare:\n  token: t\nexport:\n  zones:\n    json: \"\"\n",
        // bad rotation
        "cloudflare:\n  token: t\nlogging:\n  local_rotation: weekly\n",
    ];

    for contents in cases {
        let file = write_config(".yaml", contents);
        assert!(
            matches!(load_config(file.path()), Err(BackupError::Configuration(_))),
            "expected validation failure for:\n{contents}"
        );
    }
}

#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/cfbackup.yaml");
    assert!(matches!(result, Err(BackupError::Configuration(_))));
}
