//! Integration tests for dry-run mode
//!
//! These tests verify that dry-run performs every read and render but
//! writes nothing to disk.

mod common;

use cfbackup::config::{ExportConfig, FormatTargetConfig, ZonesExportConfig};
use cfbackup::core::export::{ExportEngine, ExportFormat, ExportPlan, FileSink, FormatTarget};
use common::FakeCloudflare;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

#[test]
fn test_export_config_dry_run_default() {
    let config = ExportConfig::default();
    assert!(!config.dry_run);
    assert_eq!(config.parallel_zones, 1);
}

#[test]
fn test_export_config_dry_run_from_yaml() {
    let config: ExportConfig = serde_yaml::from_str("dry_run: true\nzones:\n  json: /b\n").unwrap();

    assert!(config.dry_run);
    assert_eq!(
        config.zones.json,
        Some(FormatTargetConfig::Path("/b".to_string()))
    );
}

#[tokio::test]
async fn test_dry_run_reports_files_without_writing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("out");
    let api = Arc::new(
        FakeCloudflare::new()
            .with_zone("z1", "a.com")
            .with_zone("z2", "b.com")
            .with_records("z1", 60)
            .with_bind("z1", "a")
            .with_bind("z2", "b"),
    );
    let zones = ZonesExportConfig {
        json: Some(FormatTargetConfig::Path(root.to_string_lossy().to_string())),
        bind: Some(FormatTargetConfig::Path(root.to_string_lossy().to_string())),
        ..Default::default()
    };
    let plan = ExportPlan::derive(&zones, None).unwrap();
    let (_tx, rx) = watch::channel(false);

    let summary = ExportEngine::new(plan, api.clone(), Arc::new(FileSink::new()), rx)
        .with_dry_run(true)
        .execute_export()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert!(summary.is_successful());
    assert_eq!(summary.files_written(), 4);
    assert!(summary.bytes_written() > 0);
    assert!(summary
        .files
        .iter()
        .any(|f| f.format == ExportFormat::Json && f.path == root.join("a.com-z1.json.gz")));

    // reads still happen, writes do not
    assert!(api.request_count() > 1);
    assert!(!root.exists());
}

#[tokio::test]
async fn test_dry_run_with_empty_plan() {
    let api = Arc::new(FakeCloudflare::new().with_zone("z1", "a.com"));
    let (_tx, rx) = watch::channel(false);

    let summary = ExportEngine::new(
        ExportPlan::default(),
        api.clone(),
        Arc::new(FileSink::new()),
        rx,
    )
    .with_dry_run(true)
    .execute_export()
    .await
    .unwrap();

    assert!(summary.dry_run);
    assert_eq!(api.request_count(), 0);
}

#[tokio::test]
async fn test_dry_run_path_uncompressed() {
    let api = Arc::new(FakeCloudflare::new().with_zone("z1", "a.com"));
    let (_tx, rx) = watch::channel(false);
    let plan = ExportPlan::default().with_yaml(FormatTarget::new("/nonexistent/y", "yaml", false));

    let summary = ExportEngine::new(plan, api, Arc::new(FileSink::new()), rx)
        .with_dry_run(true)
        .execute_export()
        .await
        .unwrap();

    assert_eq!(
        summary.files[0].path,
        std::path::PathBuf::from("/nonexistent/y/a.com-z1.yaml")
    );
}
