//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::plan::ExportFormat;
use crate::domain::{ApiError, BackupError};
use std::path::PathBuf;
use std::time::Duration;

/// A file produced by the export (or planned, in a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub zone_name: String,
    pub format: ExportFormat,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Zones returned by the zone listing
    pub total_zones: usize,

    /// Zones whose every active format was written
    pub zones_exported: usize,

    /// Zones skipped or only partially written
    pub zones_failed: usize,

    /// Files written (or planned, in a dry run)
    pub files: Vec<ExportedFile>,

    /// Whether writes were suppressed
    pub dry_run: bool,

    /// Whether shutdown was requested before the run finished
    pub interrupted: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_zones: 0,
            zones_exported: 0,
            zones_failed: 0,
            files: Vec::new(),
            dry_run: false,
            interrupted: false,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    pub fn add_file(&mut self, file: ExportedFile) {
        self.files.push(file);
    }

    pub fn files_written(&self) -> usize {
        self.files.len()
    }

    pub fn bytes_written(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.zones_failed == 0 && self.errors.is_empty() && !self.interrupted
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_zones == 0 {
            return 100.0;
        }
        (self.zones_exported as f64 / self.total_zones as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_zones = self.total_zones,
            zones_exported = self.zones_exported,
            zones_failed = self.zones_failed,
            files = self.files_written(),
            bytes = self.bytes_written(),
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Network failure or unexpected API response
    Api,
    /// Credentials rejected by the API
    Authentication,
    /// Directory creation or file write failure
    Filesystem,
    /// Backup document could not be rendered
    Serialization,
    /// Configuration error
    Configuration,
    /// Shutdown requested mid-zone
    Cancelled,
    /// Unknown error
    Unknown,
}

impl From<&BackupError> for ExportErrorType {
    fn from(err: &BackupError) -> Self {
        match err {
            BackupError::Api(ApiError::AuthenticationFailed(_)) => ExportErrorType::Authentication,
            BackupError::Api(_) => ExportErrorType::Api,
            BackupError::Filesystem(_) | BackupError::Io(_) => ExportErrorType::Filesystem,
            BackupError::Serialization(_) => ExportErrorType::Serialization,
            BackupError::Configuration(_) => ExportErrorType::Configuration,
            BackupError::Cancelled => ExportErrorType::Cancelled,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., zone name, format)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Classify a [`BackupError`]
    pub fn from_backup_error(err: &BackupError) -> Self {
        Self::new(ExportErrorType::from(err), err.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_zones, 0);
        assert_eq!(summary.zones_exported, 0);
        assert_eq!(summary.zones_failed, 0);
        assert_eq!(summary.files_written(), 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.errors.is_empty());
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new();
        summary.total_zones = 3;
        summary.zones_exported = 3;
        assert!(summary.is_successful());

        summary.interrupted = true;
        assert!(!summary.is_successful());

        summary.interrupted = false;
        summary.zones_failed = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_summary_success_rate() {
        let mut summary = ExportSummary::new();
        summary.total_zones = 4;
        summary.zones_exported = 3;

        assert_eq!(summary.success_rate(), 75.0);

        summary.total_zones = 0;
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_bytes_written() {
        let mut summary = ExportSummary::new();
        for (format, bytes) in [(ExportFormat::Json, 120), (ExportFormat::Bind, 30)] {
            summary.add_file(ExportedFile {
                zone_name: "example.com".to_string(),
                format,
                path: PathBuf::from(format!("/b/example.com-z1.{format}")),
                bytes,
            });
        }

        assert_eq!(summary.files_written(), 2);
        assert_eq!(summary.bytes_written(), 150);
    }

    #[test]
    fn test_error_classification() {
        let auth = BackupError::Api(ApiError::AuthenticationFailed("403".into()));
        assert_eq!(ExportErrorType::from(&auth), ExportErrorType::Authentication);

        let fs = BackupError::Filesystem("read-only".into());
        let error = ExportError::from_backup_error(&fs).with_context("zone=example.com".into());
        assert_eq!(error.error_type, ExportErrorType::Filesystem);
        assert_eq!(error.context.as_deref(), Some("zone=example.com"));
        assert!(error.message.contains("read-only"));

        assert_eq!(
            ExportErrorType::from(&BackupError::Cancelled),
            ExportErrorType::Cancelled
        );
    }
}
