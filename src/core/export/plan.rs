//! Export plan derived from configuration
//!
//! The plan answers three questions for the engine: which output formats are
//! active (and where they go), which extra resource categories to fetch, and
//! which zone to restrict the run to.

use crate::config::{FormatTargetConfig, ZonesExportConfig};
use crate::domain::{BackupError, ResourceCategory, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Output format of a backup file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
    Bind,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Yaml, ExportFormat::Bind];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Bind => "bind",
        }
    }

    /// Extension used when the configuration does not set `file_ext`
    pub fn default_extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how one format is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatTarget {
    /// Destination directory, may contain `{zone_name}` / `{zone_id}`
    pub path: String,

    /// File extension without leading dot
    pub file_ext: String,

    /// Gzip the payload and append `.gz`
    pub compress: bool,
}

impl FormatTarget {
    pub fn new(path: impl Into<String>, file_ext: impl Into<String>, compress: bool) -> Self {
        Self {
            path: path.into(),
            file_ext: file_ext.into(),
            compress,
        }
    }

    fn from_config(format: ExportFormat, config: &FormatTargetConfig) -> Option<Self> {
        let path = config.path()?;
        Some(Self {
            path: path.to_string(),
            file_ext: config
                .file_ext()
                .map(|ext| ext.trim_start_matches('.'))
                .unwrap_or(format.default_extension())
                .to_string(),
            compress: config.compress().unwrap_or(true),
        })
    }
}

/// What a run exports
///
/// # Example
///
/// ```
/// use cfbackup::core::export::{ExportPlan, FormatTarget};
///
/// let plan = ExportPlan::default().with_json(FormatTarget::new("/backups", "json", true));
/// assert!(!plan.is_empty());
/// assert!(plan.needs_records());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportPlan {
    pub json: Option<FormatTarget>,
    pub yaml: Option<FormatTarget>,
    pub bind: Option<FormatTarget>,

    /// Extra categories to fetch besides DNS records and the BIND export
    pub categories: BTreeSet<ResourceCategory>,

    /// Restrict the run to the zone with this exact name
    pub zone_filter: Option<String>,
}

impl ExportPlan {
    /// Build the plan from the `export.zones` configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty zone filter.
    pub fn derive(config: &ZonesExportConfig, zone_filter: Option<String>) -> Result<Self> {
        let zone_filter = match zone_filter.as_deref().map(str::trim) {
            Some("") => {
                return Err(BackupError::Configuration(
                    "Zone filter must not be empty".to_string(),
                ))
            }
            other => other.map(str::to_string),
        };

        let target = |format: ExportFormat, config: &Option<FormatTargetConfig>| {
            config
                .as_ref()
                .and_then(|c| FormatTarget::from_config(format, c))
        };

        let extra = &config.extra;
        let categories = [
            (ResourceCategory::KeylessCertificates, extra.keyless_certificates),
            (ResourceCategory::CustomPages, extra.custom_pages),
            (ResourceCategory::PageRules, extra.pagerules),
            (ResourceCategory::Settings, extra.settings),
            (ResourceCategory::FirewallAccessRules, extra.firewall.access_rules),
            (ResourceCategory::FirewallUaRules, extra.firewall.ua_rules),
        ]
        .into_iter()
        .filter_map(|(category, enabled)| enabled.then_some(category))
        .collect();

        Ok(Self {
            json: target(ExportFormat::Json, &config.json),
            yaml: target(ExportFormat::Yaml, &config.yaml),
            bind: target(ExportFormat::Bind, &config.bind),
            categories,
            zone_filter,
        })
    }

    pub fn with_json(mut self, target: FormatTarget) -> Self {
        self.json = Some(target);
        self
    }

    pub fn with_yaml(mut self, target: FormatTarget) -> Self {
        self.yaml = Some(target);
        self
    }

    pub fn with_bind(mut self, target: FormatTarget) -> Self {
        self.bind = Some(target);
        self
    }

    pub fn with_category(mut self, category: ResourceCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_zone_filter(mut self, name: impl Into<String>) -> Self {
        self.zone_filter = Some(name.into());
        self
    }

    /// Target of a format, if active
    pub fn target(&self, format: ExportFormat) -> Option<&FormatTarget> {
        match format {
            ExportFormat::Json => self.json.as_ref(),
            ExportFormat::Yaml => self.yaml.as_ref(),
            ExportFormat::Bind => self.bind.as_ref(),
        }
    }

    /// Active formats with their targets, in json, yaml, bind order
    pub fn active_formats(&self) -> impl Iterator<Item = (ExportFormat, &FormatTarget)> {
        ExportFormat::ALL
            .into_iter()
            .filter_map(move |format| self.target(format).map(|target| (format, target)))
    }

    /// True when no format is active; such a plan touches neither the API
    /// nor the filesystem
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.yaml.is_none() && self.bind.is_none()
    }

    /// Whether the structured DNS record listing must be fetched
    pub fn needs_records(&self) -> bool {
        self.json.is_some() || self.yaml.is_some() || !self.categories.is_empty()
    }

    /// Whether the BIND zone file must be fetched
    pub fn needs_bind_export(&self) -> bool {
        self.bind.is_some()
    }

    /// Every category a zone collection fetches, in fetch order
    pub fn fetched_categories(&self) -> Vec<ResourceCategory> {
        let mut categories = Vec::with_capacity(self.categories.len() + 2);
        if self.needs_records() {
            categories.push(ResourceCategory::DnsRecords);
        }
        categories.extend(
            self.categories
                .iter()
                .copied()
                .filter(|c| !matches!(c, ResourceCategory::DnsRecords | ResourceCategory::BindExport)),
        );
        if self.needs_bind_export() {
            categories.push(ResourceCategory::BindExport);
        }
        categories
    }
}
