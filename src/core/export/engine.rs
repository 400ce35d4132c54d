//! Export engine - main orchestrator for the export process
//!
//! This module coordinates the whole backup run: it lists the zones,
//! collects each zone's resources, renders every active format and hands
//! the bytes to the output sink.

use super::backup::ZoneBackup;
use super::collector::ZoneResourceCollector;
use super::events::{ExportEvent, ExportObserver, NoopObserver};
use super::pager::PageWalker;
use super::plan::{ExportFormat, ExportPlan, FormatTarget};
use super::sink::{target_destination, OutputSink};
use super::summary::{ExportError, ExportSummary, ExportedFile};
use crate::adapters::cloudflare::{CloudflareApi, Resource};
use crate::domain::{BackupError, Result, Zone};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Default page size for every paginated listing
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Upper bound for concurrently processed zones
pub const MAX_PARALLEL_ZONES: usize = 32;

/// Largest page size the zone listing endpoint accepts
pub const MAX_ZONES_PER_PAGE: u32 = 50;

/// Export engine
///
/// # Example
///
/// ```rust,no_run
/// use cfbackup::adapters::cloudflare::CloudflareClient;
/// use cfbackup::config::load_config;
/// use cfbackup::core::export::{ExportEngine, ExportPlan, FileSink};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("cfbackup.yaml")?;
/// let plan = ExportPlan::derive(&config.export.zones, None)?;
/// let api = Arc::new(CloudflareClient::new(config.cloudflare.clone())?);
/// let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
///
/// let engine = ExportEngine::new(plan, api, Arc::new(FileSink::new()), shutdown_rx)
///     .with_per_page(config.cloudflare.per_page)
///     .with_parallel_zones(config.export.parallel_zones);
///
/// let summary = engine.execute_export().await?;
/// println!("Exported {} of {} zones", summary.zones_exported, summary.total_zones);
/// # Ok(())
/// # }
/// ```
pub struct ExportEngine {
    plan: ExportPlan,
    api: Arc<dyn CloudflareApi>,
    sink: Arc<dyn OutputSink>,
    observer: Arc<dyn ExportObserver>,
    shutdown: watch::Receiver<bool>,
    per_page: u32,
    parallel_zones: usize,
    dry_run: bool,
}

/// How processing a single zone ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneStatus {
    Exported,
    Failed,
    Cancelled,
}

#[derive(Debug)]
struct ZoneOutcome {
    status: ZoneStatus,
    files: Vec<ExportedFile>,
    errors: Vec<ExportError>,
}

impl ZoneOutcome {
    fn cancelled() -> Self {
        Self {
            status: ZoneStatus::Cancelled,
            files: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl ExportEngine {
    /// Create a new export engine
    pub fn new(
        plan: ExportPlan,
        api: Arc<dyn CloudflareApi>,
        sink: Arc<dyn OutputSink>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            plan,
            api,
            sink,
            observer: Arc::new(NoopObserver),
            shutdown,
            per_page: DEFAULT_PER_PAGE,
            parallel_zones: 1,
            dry_run: false,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExportObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Process up to `parallel_zones` zones at once (clamped to 1..=32)
    pub fn with_parallel_zones(mut self, parallel_zones: usize) -> Self {
        self.parallel_zones = parallel_zones.clamp(1, MAX_PARALLEL_ZONES);
        self
    }

    /// Run everything except the sink writes
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn walker(&self) -> PageWalker {
        PageWalker::new(self.per_page, self.shutdown.clone())
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Execute the export
    ///
    /// 1. Lists all zones (server-side filtered by name when a filter is set)
    /// 2. For each zone, possibly in parallel:
    ///    - collects the planned resources
    ///    - renders every active format
    ///    - writes each file through the sink
    /// 3. Returns the run summary
    ///
    /// Failures of a single zone or file are recorded in the summary and the
    /// run continues.
    ///
    /// # Errors
    ///
    /// Only a failure of the zone listing itself aborts the run.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.dry_run;

        if self.plan.is_empty() {
            tracing::warn!("No export format configured, nothing to do");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        tracing::info!(
            formats = ?self.plan.active_formats().map(|(f, _)| f).collect::<Vec<_>>(),
            categories = ?self.plan.categories,
            zone_filter = ?self.plan.zone_filter,
            parallel_zones = self.parallel_zones,
            dry_run = self.dry_run,
            "Starting export process"
        );

        let listed = match self.list_zones().await {
            Ok(listed) => listed,
            Err(BackupError::Cancelled) => {
                tracing::info!("Shutdown requested while listing zones");
                summary.interrupted = true;
                return Ok(summary.with_duration(start_time.elapsed()));
            }
            Err(e) => {
                self.observer.on_event(&ExportEvent::Failed {
                    zone_name: None,
                    format: None,
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        summary.total_zones = listed.len();
        self.observer
            .on_event(&ExportEvent::ZonesListed { count: listed.len() });

        // A malformed listing entry fails only that zone
        let mut zones = Vec::with_capacity(listed.len());
        for (index, entry) in listed.into_iter().enumerate() {
            match entry {
                Ok(zone) => zones.push(zone),
                Err(e) => {
                    self.observer.on_event(&ExportEvent::Failed {
                        zone_name: None,
                        format: None,
                        message: e.to_string(),
                    });
                    summary.zones_failed += 1;
                    summary.add_error(
                        ExportError::from_backup_error(&e)
                            .with_context(format!("zone listing entry {index}")),
                    );
                }
            }
        }

        tracing::info!(zone_count = zones.len(), "Processing zones");

        let outcomes: Vec<ZoneOutcome> = stream::iter(zones)
            .map(|zone| self.process_zone(zone))
            .buffer_unordered(self.parallel_zones)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome.status {
                ZoneStatus::Exported => summary.zones_exported += 1,
                ZoneStatus::Failed => summary.zones_failed += 1,
                ZoneStatus::Cancelled => summary.interrupted = true,
            }
            for file in outcome.files {
                summary.add_file(file);
            }
            for error in outcome.errors {
                summary.add_error(error);
            }
        }

        if self.is_shutdown_requested() {
            summary.interrupted = true;
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Walk the zone listing
    ///
    /// Entries whose name differs from the zone filter are dropped. Each
    /// remaining entry is parsed on its own so one bad object does not hide
    /// its siblings.
    async fn list_zones(&self) -> Result<Vec<Result<Zone>>> {
        let filter = self.plan.zone_filter.as_deref();
        let walker = PageWalker::new(
            self.per_page.min(MAX_ZONES_PER_PAGE),
            self.shutdown.clone(),
        );
        let items = walker
            .walk_resource(self.api.as_ref(), &Resource::Zones, filter)
            .await?
            .into_items()?;

        Ok(items
            .into_iter()
            .filter(|item| match (filter, item.get("name").and_then(Value::as_str)) {
                (Some(wanted), Some(name)) => name == wanted,
                _ => true,
            })
            .map(|item| Zone::from_value(item).map_err(BackupError::Serialization))
            .collect())
    }

    /// Collect, render and write one zone
    async fn process_zone(&self, zone: Zone) -> ZoneOutcome {
        if self.is_shutdown_requested() {
            return ZoneOutcome::cancelled();
        }

        tracing::info!(zone = %zone.name, zone_id = %zone.id, "Exporting zone");
        self.observer.on_event(&ExportEvent::ZoneStarted {
            zone_id: zone.id.to_string(),
            zone_name: zone.name.clone(),
        });

        let collector = ZoneResourceCollector::new(self.api.clone(), self.walker());
        let backup = match collector.collect(&zone, &self.plan).await {
            Ok(backup) => backup,
            Err(BackupError::Cancelled) => {
                tracing::info!(zone = %zone.name, "Zone skipped, shutdown requested");
                return ZoneOutcome::cancelled();
            }
            Err(e) => {
                self.observer.on_event(&ExportEvent::Failed {
                    zone_name: Some(zone.name.clone()),
                    format: None,
                    message: e.to_string(),
                });
                return ZoneOutcome {
                    status: ZoneStatus::Failed,
                    files: Vec::new(),
                    errors: vec![ExportError::from_backup_error(&e)
                        .with_context(format!("zone={}, zone_id={}", zone.name, zone.id))],
                };
            }
        };

        let mut files = Vec::new();
        let mut errors = Vec::new();

        for (format, target) in self.plan.active_formats() {
            match self.write_format(&backup, format, target).await {
                Ok(file) => {
                    self.observer.on_event(&ExportEvent::FileWritten {
                        zone_name: zone.name.clone(),
                        format,
                        path: file.path.clone(),
                        bytes: file.bytes,
                        dry_run: self.dry_run,
                    });
                    files.push(file);
                }
                Err(e) => {
                    self.observer.on_event(&ExportEvent::Failed {
                        zone_name: Some(zone.name.clone()),
                        format: Some(format),
                        message: e.to_string(),
                    });
                    errors.push(
                        ExportError::from_backup_error(&e)
                            .with_context(format!("zone={}, format={format}", zone.name)),
                    );
                }
            }
        }

        self.observer.on_event(&ExportEvent::ZoneFinished {
            zone_id: zone.id.to_string(),
            zone_name: zone.name.clone(),
            files: files.len(),
        });

        ZoneOutcome {
            status: if errors.is_empty() {
                ZoneStatus::Exported
            } else {
                ZoneStatus::Failed
            },
            files,
            errors,
        }
    }

    /// Render one format and write it, or only compute the path in a dry run
    async fn write_format(
        &self,
        backup: &ZoneBackup,
        format: ExportFormat,
        target: &FormatTarget,
    ) -> Result<ExportedFile> {
        let payload = backup.render(format)?;

        let (path, bytes) = if self.dry_run {
            let path = target_destination(target, &backup.zone);
            tracing::info!(path = %path.display(), bytes = payload.len(), "Dry run, skipping write");
            (path, payload.len() as u64)
        } else {
            let written = self.sink.write(target, &backup.zone, &payload).await?;
            (written.path, written.bytes)
        };

        Ok(ExportedFile {
            zone_name: backup.zone.name.clone(),
            format,
            path,
            bytes,
        })
    }
}
