//! Export orchestration
//!
//! This module provides the core backup logic for cfbackup, including:
//! - Generic pagination over API listings
//! - Per-zone resource collection
//! - Output planning, rendering and file writing
//! - Export coordination and reporting

pub mod backup;
pub mod collector;
pub mod engine;
pub mod events;
pub mod pager;
pub mod plan;
pub mod sink;
pub mod summary;

pub use backup::ZoneBackup;
pub use collector::ZoneResourceCollector;
pub use engine::{ExportEngine, DEFAULT_PER_PAGE, MAX_PARALLEL_ZONES};
pub use events::{ExportEvent, ExportObserver, NoopObserver};
pub use pager::{PageWalker, WalkOutput};
pub use plan::{ExportFormat, ExportPlan, FormatTarget};
pub use sink::{destination, write_file, FileSink, OutputSink, WrittenFile};
pub use summary::{ExportError, ExportErrorType, ExportSummary, ExportedFile};
