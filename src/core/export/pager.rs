//! Generic paginated-collection walker
//!
//! Every listing the exporter reads (zones, DNS records, extra categories)
//! goes through [`PageWalker::walk`]. It requests pages 1, 2, ... until the
//! `result_info` says there are no more, and short-circuits on endpoints that
//! return a single value instead of a sequence.

use crate::adapters::cloudflare::{CloudflareApi, Page, PageParams, Resource};
use crate::domain::{BackupError, Result};
use serde_json::Value;
use std::future::Future;
use tokio::sync::watch;

/// What a walk produced
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutput {
    /// All elements of a (possibly paginated) sequence, in page order
    Collection(Vec<Value>),

    /// A non-sequence payload, returned as-is after one fetch
    Single(Value),
}

impl WalkOutput {
    /// Converts the output into a JSON value (an array for collections)
    pub fn into_value(self) -> Value {
        match self {
            WalkOutput::Collection(items) => Value::Array(items),
            WalkOutput::Single(value) => value,
        }
    }

    /// Returns the collected elements
    ///
    /// # Errors
    ///
    /// Fails when the endpoint answered with a single value where a listing
    /// was expected.
    pub fn into_items(self) -> Result<Vec<Value>> {
        match self {
            WalkOutput::Collection(items) => Ok(items),
            WalkOutput::Single(value) => Err(BackupError::Serialization(format!(
                "Expected a list result, got {}",
                type_name(&value)
            ))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Drains paginated endpoints into memory
///
/// A walker carries the page size and the shutdown signal; it holds no
/// pagination state between walks, so one walker can be shared by all
/// concurrently processed zones.
#[derive(Debug, Clone)]
pub struct PageWalker {
    per_page: u32,
    shutdown: watch::Receiver<bool>,
}

impl PageWalker {
    /// Create a walker requesting `per_page` items per page
    pub fn new(per_page: u32, shutdown: watch::Receiver<bool>) -> Self {
        Self { per_page, shutdown }
    }

    /// Walk a paginated endpoint through the `fetch` callback
    ///
    /// Starting at page 1, each page's sequence `result` is appended to the
    /// output. The walk stops when `result_info` is absent, when
    /// `total_pages` is 0, or once the page number reaches `total_pages`.
    /// A non-sequence `result` is returned immediately as
    /// [`WalkOutput::Single`].
    ///
    /// `filter` is forwarded as the `name` parameter of every request so the
    /// server applies it before paginating.
    ///
    /// # Errors
    ///
    /// Errors from `fetch` propagate unchanged. Returns
    /// [`BackupError::Cancelled`] if shutdown is signalled before a fetch.
    pub async fn walk<F, Fut>(&self, filter: Option<&str>, mut fetch: F) -> Result<WalkOutput>
    where
        F: FnMut(PageParams) -> Fut,
        Fut: Future<Output = Result<Page>>,
    {
        let mut items: Vec<Value> = Vec::new();
        let mut page_number: u32 = 0;

        loop {
            if *self.shutdown.borrow() {
                return Err(BackupError::Cancelled);
            }

            page_number += 1;
            let mut params = PageParams::new(page_number, self.per_page);
            if let Some(name) = filter {
                params = params.with_name(name);
            }

            let page = fetch(params).await?;
            let total_pages = page.result_info.as_ref().map(|info| info.total_pages());

            match page.result {
                Value::Array(batch) => items.extend(batch),
                Value::Null => {}
                single => return Ok(WalkOutput::Single(single)),
            }

            tracing::trace!(
                page = page_number,
                total_pages = ?total_pages,
                collected = items.len(),
                "Fetched page"
            );

            match total_pages {
                None | Some(0) => break,
                Some(total) if page_number >= total => break,
                Some(_) => {}
            }
        }

        Ok(WalkOutput::Collection(items))
    }

    /// Walk one API resource
    pub async fn walk_resource(
        &self,
        api: &dyn CloudflareApi,
        resource: &Resource,
        filter: Option<&str>,
    ) -> Result<WalkOutput> {
        self.walk(filter, move |params| async move {
            api.get(resource, &params).await
        })
        .await
    }
}
