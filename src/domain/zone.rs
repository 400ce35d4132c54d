//! Zone snapshot types
//!
//! A [`Zone`] is fetched once per run from the zone listing and carried
//! through collection and serialization untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Zone identifier newtype wrapper
///
/// Cloudflare zone ids are 32 character hex strings, but any non-empty value
/// without path separators is accepted since the id ends up in file names.
///
/// # Examples
///
/// ```
/// use cfbackup::domain::ZoneId;
/// use std::str::FromStr;
///
/// let zone_id = ZoneId::from_str("023e105f4ecef8ad9ca31a8372d0c353").unwrap();
/// assert_eq!(zone_id.as_str(), "023e105f4ecef8ad9ca31a8372d0c353");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a new ZoneId from a string
    ///
    /// Returns `Err` if the id is empty or contains a path separator.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Zone ID cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('\\') {
            return Err(format!("Zone ID cannot contain path separators: {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the zone ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A zone as returned by the zone listing endpoint
///
/// Only `id` and `name` are interpreted; every other field the provider
/// returns is kept in `attributes` and written back out verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable, unique zone identifier
    pub id: ZoneId,

    /// Human-readable zone name (the domain)
    pub name: String,

    /// Remaining provider fields
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Zone {
    /// Creates a zone with no extra attributes
    pub fn new(id: ZoneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Parses a zone out of a raw listing element
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|e| format!("Invalid zone object: {e}"))
    }
}
