//! Export progress events

use super::plan::ExportFormat;
use std::path::PathBuf;

/// Something that happened during an export run
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    /// The zone listing finished
    ZonesListed { count: usize },

    /// Collection for a zone is starting
    ZoneStarted { zone_id: String, zone_name: String },

    /// A backup file was written (or would have been, in a dry run)
    FileWritten {
        zone_name: String,
        format: ExportFormat,
        path: PathBuf,
        bytes: u64,
        dry_run: bool,
    },

    /// All formats of a zone were processed
    ZoneFinished {
        zone_id: String,
        zone_name: String,
        files: usize,
    },

    /// A zone or a single file failed
    Failed {
        zone_name: Option<String>,
        format: Option<ExportFormat>,
        message: String,
    },
}

/// Receives [`ExportEvent`]s as the engine emits them
///
/// Called from the engine's tasks, so implementations must be cheap and
/// must not block.
pub trait ExportObserver: Send + Sync {
    fn on_event(&self, event: &ExportEvent);
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExportObserver for NoopObserver {
    fn on_event(&self, _event: &ExportEvent) {}
}
