//! Per-zone backup document

use super::pager::WalkOutput;
use super::plan::ExportFormat;
use crate::domain::{BackupError, ResourceCategory, Result, Zone};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Everything collected for one zone
///
/// Serializes as `{zone, records, firewall, <extra categories>...}`.
/// Categories that were not fetched are absent from the document rather
/// than `null`. The BIND zone file text is kept aside for the bind writer and
/// never appears in the structured document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBackup {
    pub zone: Zone,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub firewall: Map<String, Value>,

    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,

    #[serde(skip)]
    pub bind: Option<String>,
}

impl ZoneBackup {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            records: None,
            firewall: Map::new(),
            extras: BTreeMap::new(),
            bind: None,
        }
    }

    /// Store the walk output of one category under its document key
    ///
    /// # Errors
    ///
    /// Fails when the DNS record listing is not a sequence or the BIND export
    /// is not text.
    pub fn insert(&mut self, category: ResourceCategory, output: WalkOutput) -> Result<()> {
        match category {
            ResourceCategory::DnsRecords => {
                self.records = Some(output.into_items()?);
            }
            ResourceCategory::BindExport => match output {
                WalkOutput::Single(Value::String(text)) => self.bind = Some(text),
                other => {
                    return Err(BackupError::Serialization(format!(
                        "BIND export for zone {} is not text: {}",
                        self.zone.name,
                        other.into_value()
                    )))
                }
            },
            c if c.is_firewall() => {
                self.firewall
                    .insert(c.document_key().to_string(), output.into_value());
            }
            c => {
                self.extras
                    .insert(c.document_key().to_string(), output.into_value());
            }
        }
        Ok(())
    }

    /// Value stored for a category, if it was collected
    pub fn get(&self, category: ResourceCategory) -> Option<Value> {
        match category {
            ResourceCategory::DnsRecords => self.records.clone().map(Value::Array),
            ResourceCategory::BindExport => self.bind.clone().map(Value::String),
            c if c.is_firewall() => self.firewall.get(c.document_key()).cloned(),
            c => self.extras.get(c.document_key()).cloned(),
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    /// Serialize the backup in one output format
    ///
    /// JSON is pretty-printed, YAML is a plain structured dump, BIND is the
    /// zone file text exactly as the API returned it.
    pub fn render(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(self)?),
            ExportFormat::Yaml => Ok(serde_yaml::to_string(self)?.into_bytes()),
            ExportFormat::Bind => self
                .bind
                .as_ref()
                .map(|text| text.as_bytes().to_vec())
                .ok_or_else(|| {
                    BackupError::Serialization(format!(
                        "BIND export was not collected for zone {}",
                        self.zone.name
                    ))
                }),
        }
    }
}
