//! Per-zone resource collection

use super::backup::ZoneBackup;
use super::pager::PageWalker;
use super::plan::ExportPlan;
use crate::adapters::cloudflare::{CloudflareApi, Resource};
use crate::domain::{Result, Zone};
use std::sync::Arc;

/// Gathers the configured resource categories of one zone
///
/// Collection is read-only; the only side effects are API reads. Any fetch
/// failure aborts the whole zone so that no partial backup gets written.
pub struct ZoneResourceCollector {
    api: Arc<dyn CloudflareApi>,
    walker: PageWalker,
}

impl ZoneResourceCollector {
    pub fn new(api: Arc<dyn CloudflareApi>, walker: PageWalker) -> Self {
        Self { api, walker }
    }

    /// Collect everything the plan needs for `zone`
    ///
    /// DNS records are fetched when a structured format is active or any
    /// extra category is enabled. The BIND zone file is fetched with one
    /// non-paginated call when the bind format is active.
    ///
    /// # Errors
    ///
    /// The first failing fetch is returned; nothing collected so far is kept.
    pub async fn collect(&self, zone: &Zone, plan: &ExportPlan) -> Result<ZoneBackup> {
        let mut backup = ZoneBackup::new(zone.clone());

        for category in plan.fetched_categories() {
            let resource = Resource::Zone(zone.id.clone(), category);
            let output = self
                .walker
                .walk_resource(self.api.as_ref(), &resource, None)
                .await?;

            tracing::debug!(
                zone = %zone.name,
                category = %category,
                "Collected zone resource"
            );

            backup.insert(category, output)?;
        }

        tracing::debug!(
            zone = %zone.name,
            zone_id = %zone.id,
            records = backup.record_count(),
            "Zone collection complete"
        );

        Ok(backup)
    }
}
