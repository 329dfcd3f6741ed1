use crate::config::{default_catalog_timeout_secs, default_catalog_url, default_search_limit};

use serde::{Deserialize, Serialize};

/// Upstream audiobook catalog (LibriVox feed) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Feed endpoint. LibriVox requires the trailing slash.
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    /// Page size when a search request does not specify one.
    #[serde(default = "default_search_limit")]
    pub default_limit: u32,
    /// Per-request timeout.
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            default_limit: default_search_limit(),
            timeout_secs: default_catalog_timeout_secs(),
        }
    }
}
