//! Cloudflare API adapter
//!
//! This module provides the integration with the Cloudflare v4 API: the
//! [`CloudflareApi`] trait the export engine depends on, its HTTP
//! implementation, and the wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::CloudflareApi;
pub use client::CloudflareClient;
pub use models::{Page, PageParams, Resource, ResultInfo};
