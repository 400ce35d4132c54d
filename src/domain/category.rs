//! Per-zone resource categories

use super::zone::ZoneId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sub-resource type exported for each zone
///
/// Each category maps to one API endpoint keyed by zone id. The ordering is
/// the order categories are fetched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    #[serde(rename = "dns_records")]
    DnsRecords,
    #[serde(rename = "keyless_certificates")]
    KeylessCertificates,
    #[serde(rename = "custom_pages")]
    CustomPages,
    #[serde(rename = "pagerules")]
    PageRules,
    #[serde(rename = "settings")]
    Settings,
    #[serde(rename = "firewall.access_rules")]
    FirewallAccessRules,
    #[serde(rename = "firewall.ua_rules")]
    FirewallUaRules,
    #[serde(rename = "bind_export")]
    BindExport,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 8] = [
        ResourceCategory::DnsRecords,
        ResourceCategory::KeylessCertificates,
        ResourceCategory::CustomPages,
        ResourceCategory::PageRules,
        ResourceCategory::Settings,
        ResourceCategory::FirewallAccessRules,
        ResourceCategory::FirewallUaRules,
        ResourceCategory::BindExport,
    ];

    /// Dotted name used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::DnsRecords => "dns_records",
            ResourceCategory::KeylessCertificates => "keyless_certificates",
            ResourceCategory::CustomPages => "custom_pages",
            ResourceCategory::PageRules => "pagerules",
            ResourceCategory::Settings => "settings",
            ResourceCategory::FirewallAccessRules => "firewall.access_rules",
            ResourceCategory::FirewallUaRules => "firewall.ua_rules",
            ResourceCategory::BindExport => "bind_export",
        }
    }

    /// Key the category is stored under in the backup document
    ///
    /// Firewall categories are stored under their sub-key inside `firewall`.
    pub fn document_key(&self) -> &'static str {
        match self {
            ResourceCategory::FirewallAccessRules => "access_rules",
            ResourceCategory::FirewallUaRules => "ua_rules",
            ResourceCategory::DnsRecords => "records",
            other => other.as_str(),
        }
    }

    /// True for the categories nested under `firewall`
    pub fn is_firewall(&self) -> bool {
        matches!(
            self,
            ResourceCategory::FirewallAccessRules | ResourceCategory::FirewallUaRules
        )
    }

    /// API path for this category, relative to the API base URL
    pub fn endpoint(&self, zone_id: &ZoneId) -> String {
        let suffix = match self {
            ResourceCategory::DnsRecords => "dns_records",
            ResourceCategory::KeylessCertificates => "keyless_certificates",
            ResourceCategory::CustomPages => "custom_pages",
            ResourceCategory::PageRules => "pagerules",
            ResourceCategory::Settings => "settings",
            ResourceCategory::FirewallAccessRules => "firewall/access_rules/rules",
            ResourceCategory::FirewallUaRules => "firewall/ua_rules",
            ResourceCategory::BindExport => "dns_records/export",
        };
        format!("/zones/{zone_id}/{suffix}")
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown resource category: {s}"))
    }
}
