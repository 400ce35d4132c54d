//! External system integrations for cfbackup.
//!
//! - [`cloudflare`] - Cloudflare v4 API client
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export engine
//! can be tested with in-memory implementations:
//!
//! ```rust,no_run
//! use cfbackup::adapters::cloudflare::{CloudflareApi, CloudflareClient};
//! use cfbackup::config::{secret_string, CloudflareConfig};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CloudflareConfig {
//!     token: Some(secret_string("api-token".to_string())),
//!     ..Default::default()
//! };
//!
//! let api: Arc<dyn CloudflareApi> = Arc::new(CloudflareClient::new(config)?);
//! # Ok(())
//! # }
//! ```

pub mod cloudflare;
