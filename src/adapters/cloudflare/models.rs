//! Cloudflare API request and response models

use crate::domain::{ResourceCategory, ZoneId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An API resource that can be fetched with `GET`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The account's zone listing
    Zones,

    /// One category of a zone's configuration
    Zone(ZoneId, ResourceCategory),
}

impl Resource {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Resource::Zones => "/zones".to_string(),
            Resource::Zone(zone_id, category) => category.endpoint(zone_id),
        }
    }

    /// Whether the endpoint accepts `page` / `per_page`
    pub fn is_paginated(&self) -> bool {
        !matches!(
            self,
            Resource::Zone(_, ResourceCategory::BindExport | ResourceCategory::Settings)
        )
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Zones => f.write_str("zones"),
            Resource::Zone(zone_id, category) => write!(f, "zones/{zone_id}/{category}"),
        }
    }
}

/// Query parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based page number
    pub page: u32,

    /// Requested page size
    pub per_page: u32,

    /// Exact-match name filter (zone listing only)
    pub name: Option<String>,
}

impl PageParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Query pairs for a resource; page fields are omitted for
    /// non-paginated endpoints
    pub fn to_query(&self, paginated: bool) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(3);
        if paginated {
            query.push(("page", self.page.to_string()));
            query.push(("per_page", self.per_page.to_string()));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        query
    }
}

/// Pagination metadata returned next to `result`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub per_page: Option<u32>,

    #[serde(default)]
    pub count: Option<u32>,

    #[serde(default)]
    pub total_count: Option<u32>,

    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl ResultInfo {
    /// Result info reporting `total_pages` pages
    pub fn with_total_pages(total_pages: u32) -> Self {
        Self {
            total_pages: Some(total_pages),
            ..Default::default()
        }
    }

    /// Total number of pages
    ///
    /// Falls back to `ceil(total_count / per_page)` for endpoints that omit
    /// `total_pages`, and to 0 when neither is available.
    pub fn total_pages(&self) -> u32 {
        if let Some(total_pages) = self.total_pages {
            return total_pages;
        }
        match (self.total_count, self.per_page) {
            (Some(total), Some(per_page)) if per_page > 0 => total.div_ceil(per_page),
            _ => 0,
        }
    }
}

/// One fetch result: a sequence or a single value, plus optional paging info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub result: Value,

    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl Page {
    /// A page of a paginated listing
    pub fn paginated(items: Vec<Value>, total_pages: u32) -> Self {
        Self {
            result: Value::Array(items),
            result_info: Some(ResultInfo::with_total_pages(total_pages)),
        }
    }

    /// A response from a non-paginated endpoint
    pub fn single(result: Value) -> Self {
        Self {
            result,
            result_info: None,
        }
    }
}

/// Error or message entry in the response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,
}

/// Standard Cloudflare response envelope
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    #[serde(default)]
    pub result: Value,

    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl ApiEnvelope {
    /// Joins the envelope's error entries into one message
    pub fn error_message(&self) -> String {
        if self.errors.is_empty() {
            return "Unknown error".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} ({})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_page(self) -> Page {
        Page {
            result: self.result,
            result_info: self.result_info,
        }
    }
}
