//! Shared fakes for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cfbackup::adapters::cloudflare::{CloudflareApi, Page, PageParams, Resource};
use cfbackup::domain::{ApiError, ResourceCategory, Result};
use flate2::read::GzDecoder;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::Mutex;
use tokio::sync::watch;

/// In-memory Cloudflare account
///
/// Zone listings and per-zone collections are paginated with `per_page`
/// taken from each request, like the real API.
#[derive(Default)]
pub struct FakeCloudflare {
    zones: Vec<Value>,
    collections: HashMap<(String, ResourceCategory), Vec<Value>>,
    bind: HashMap<String, String>,
    failing: HashMap<String, ResourceCategory>,
    requests: Mutex<Vec<String>>,
    /// Raise the shutdown flag when this resource is requested
    shutdown_on: Option<(String, watch::Sender<bool>)>,
}

impl FakeCloudflare {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zones
            .push(json!({"id": id, "name": name, "status": "active", "paused": false}));
        self
    }

    pub fn with_records(mut self, zone_id: &str, count: usize) -> Self {
        let records = (0..count)
            .map(|i| json!({"id": format!("rec{i}"), "type": "A", "content": format!("192.0.2.{}", i % 250)}))
            .collect();
        self.collections
            .insert((zone_id.to_string(), ResourceCategory::DnsRecords), records);
        self
    }

    pub fn with_collection(mut self, zone_id: &str, category: ResourceCategory, items: Vec<Value>) -> Self {
        self.collections.insert((zone_id.to_string(), category), items);
        self
    }

    pub fn with_bind(mut self, zone_id: &str, text: &str) -> Self {
        self.bind.insert(zone_id.to_string(), text.to_string());
        self
    }

    pub fn failing(mut self, zone_id: &str, category: ResourceCategory) -> Self {
        self.failing.insert(zone_id.to_string(), category);
        self
    }

    pub fn shutdown_on(mut self, resource: &str, tx: watch::Sender<bool>) -> Self {
        self.shutdown_on = Some((resource.to_string(), tx));
        self
    }

    /// Every request made so far, as `resource#page`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn page_of(items: &[Value], params: &PageParams) -> Page {
        let per_page = params.per_page.max(1) as usize;
        let total_pages = items.len().div_ceil(per_page) as u32;
        let start = (params.page as usize - 1) * per_page;
        let chunk = items.iter().skip(start).take(per_page).cloned().collect();
        Page::paginated(chunk, total_pages)
    }
}

#[async_trait]
impl CloudflareApi for FakeCloudflare {
    async fn get(&self, resource: &Resource, params: &PageParams) -> Result<Page> {
        let key = resource.to_string();
        self.requests
            .lock()
            .unwrap()
            .push(format!("{key}#{}", params.page));

        if let Some((trigger, tx)) = &self.shutdown_on {
            if *trigger == key {
                let _ = tx.send(true);
            }
        }

        match resource {
            Resource::Zones => {
                let zones: Vec<Value> = self
                    .zones
                    .iter()
                    .filter(|z| params.name.as_deref().map_or(true, |n| z["name"] == n))
                    .cloned()
                    .collect();
                Ok(Self::page_of(&zones, params))
            }
            Resource::Zone(zone_id, category) => {
                if self.failing.get(zone_id.as_str()) == Some(category) {
                    return Err(ApiError::ServerError {
                        status: 500,
                        message: "internal error".into(),
                    }
                    .into());
                }
                match category {
                    ResourceCategory::BindExport => Ok(Page::single(Value::String(
                        self.bind.get(zone_id.as_str()).cloned().unwrap_or_default(),
                    ))),
                    ResourceCategory::Settings => {
                        let items = self
                            .collections
                            .get(&(zone_id.to_string(), *category))
                            .cloned()
                            .unwrap_or_default();
                        Ok(Page::single(Value::Array(items)))
                    }
                    _ => {
                        let items = self
                            .collections
                            .get(&(zone_id.to_string(), *category))
                            .cloned()
                            .unwrap_or_default();
                        Ok(Self::page_of(&items, params))
                    }
                }
            }
        }
    }
}

pub fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).unwrap();
    out
}

pub fn read_json_gz(path: &std::path::Path) -> Value {
    serde_json::from_slice(&gunzip(&std::fs::read(path).unwrap())).unwrap()
}
