//! Domain models and types for cfbackup.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Zone snapshots** ([`Zone`], [`ZoneId`])
//! - **Resource categories** ([`ResourceCategory`]) and their endpoints
//! - **Error types** ([`BackupError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Zone ids use the newtype pattern and reject values that would escape the
//! output directory once embedded in a file name:
//!
//! ```rust
//! use cfbackup::domain::ZoneId;
//!
//! assert!(ZoneId::new("023e105f4ecef8ad9ca31a8372d0c353").is_ok());
//! assert!(ZoneId::new("../../etc").is_err());
//! ```

pub mod category;
pub mod errors;
pub mod result;
pub mod zone;

pub use category::ResourceCategory;
pub use errors::{ApiError, BackupError};
pub use result::Result;
pub use zone::{Zone, ZoneId};
