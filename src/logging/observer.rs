//! Export observer that reports progress through `tracing`

use crate::core::export::{ExportEvent, ExportObserver};

/// Logs every [`ExportEvent`] as a structured tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExportObserver for TracingObserver {
    fn on_event(&self, event: &ExportEvent) {
        match event {
            ExportEvent::ZonesListed { count } => {
                tracing::info!(zone_count = count, "Zone listing complete");
            }
            ExportEvent::ZoneStarted { zone_id, zone_name } => {
                tracing::debug!(zone = %zone_name, zone_id = %zone_id, "Zone started");
            }
            ExportEvent::FileWritten {
                zone_name,
                format,
                path,
                bytes,
                dry_run,
            } => {
                tracing::info!(
                    zone = %zone_name,
                    format = %format,
                    path = %path.display(),
                    bytes = bytes,
                    dry_run = dry_run,
                    "Backup file written"
                );
            }
            ExportEvent::ZoneFinished {
                zone_id,
                zone_name,
                files,
            } => {
                tracing::info!(zone = %zone_name, zone_id = %zone_id, files = files, "Zone finished");
            }
            ExportEvent::Failed {
                zone_name,
                format,
                message,
            } => {
                crate::log_error_with_context!(
                    message,
                    format!(
                        "zone={} format={}",
                        zone_name.as_deref().unwrap_or("-"),
                        format.map_or("-", |f| f.as_str())
                    )
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::ExportFormat;
    use std::path::PathBuf;

    #[test]
    fn test_handles_every_event() {
        // No subscriber is installed; this only exercises the match arms
        let observer = TracingObserver;
        let events = [
            ExportEvent::ZonesListed { count: 2 },
            ExportEvent::ZoneStarted {
                zone_id: "z1".into(),
                zone_name: "a.com".into(),
            },
            ExportEvent::FileWritten {
                zone_name: "a.com".into(),
                format: ExportFormat::Yaml,
                path: PathBuf::from("/b/a.com-z1.yaml.gz"),
                bytes: 10,
                dry_run: false,
            },
            ExportEvent::ZoneFinished {
                zone_id: "z1".into(),
                zone_name: "a.com".into(),
                files: 1,
            },
            ExportEvent::Failed {
                zone_name: None,
                format: Some(ExportFormat::Bind),
                message: "disk full".into(),
            },
        ];

        for event in &events {
            observer.on_event(event);
        }
    }
}
