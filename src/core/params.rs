use serde::{Deserialize, Serialize};

/// EPA Substance Registry Services CAS lookup endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://cdxapps.epa.gov/oms-substance-registry-services/rest-api/substance/cas";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Registry connection parameters suitable for config files and CLI flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryParams {
    /// Base endpoint; the identifier is appended as the last path segment
    pub base_url: String,
    /// Per-request timeout covering connect and body read
    pub timeout_secs: u64,
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RegistryParams {
    /// Exact-match lookup URL for one identifier.
    pub fn lookup_url(&self, identifier: &str) -> String {
        format!(
            "{}/{}?qualifier=exact",
            self.base_url.trim_end_matches('/'),
            identifier
        )
    }
}
