//! Cloudflare API trait definition
//!
//! The export engine only ever issues `GET` requests and only needs the raw
//! `{result, result_info}` shape back, so the whole API surface it depends on
//! is a single method. [`CloudflareClient`](super::CloudflareClient) is the
//! HTTP implementation; tests substitute in-memory fakes.

use super::models::{Page, PageParams, Resource};
use crate::domain::Result;
use async_trait::async_trait;

/// Read-only access to the Cloudflare API
///
/// Implementations are shared across concurrently processed zones, so they
/// must be `Send + Sync` and hold no per-request mutable state.
///
/// # Example
///
/// ```no_run
/// use cfbackup::adapters::cloudflare::{CloudflareApi, CloudflareClient, PageParams, Resource};
/// use cfbackup::config::CloudflareConfig;
///
/// # async fn example() -> cfbackup::domain::Result<()> {
/// let client = CloudflareClient::new(CloudflareConfig::default())?;
/// let page = client.get(&Resource::Zones, &PageParams::new(1, 50)).await?;
/// println!("{:?}", page.result_info);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CloudflareApi: Send + Sync {
    /// Fetch one page (or the single payload) of a resource
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Api`](crate::domain::BackupError::Api) for
    /// network failures, rejected credentials, and malformed responses.
    async fn get(&self, resource: &Resource, params: &PageParams) -> Result<Page>;
}
