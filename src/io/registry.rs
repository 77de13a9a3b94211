//! EPA SRS registry client: the `RegistryClient` seam, the blocking HTTP
//! implementation and response decoding.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::core::params::RegistryParams;

/// A single synonym entry from the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synonym {
    #[serde(default)]
    pub synonym_name: Option<String>,
}

/// The subset of a registry substance object that casquery reads.
/// Unknown fields in the response are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstanceData {
    #[serde(default)]
    pub systematic_name: Option<String>,
    #[serde(default)]
    pub epa_name: Option<String>,
    #[serde(default)]
    pub current_cas_number: Option<String>,
    #[serde(default)]
    pub synonyms: Option<Vec<Synonym>>,
}

impl SubstanceData {
    /// Synonym names joined with `;`, skipping unnamed entries.
    /// `None` when nothing is left to join.
    pub fn joined_synonyms(&self) -> Option<String> {
        let joined = self
            .synonyms
            .iter()
            .flatten()
            .filter_map(|s| s.synonym_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(";");
        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Received status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed registry response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Exact-match lookup against a substance registry.
///
/// Implementations absorb every failure: a lookup either yields data or
/// `None`, and never aborts the caller.
pub trait RegistryClient {
    fn lookup(&self, identifier: &str) -> Option<SubstanceData>;
}

impl<T: RegistryClient + ?Sized> RegistryClient for &T {
    fn lookup(&self, identifier: &str) -> Option<SubstanceData> {
        (**self).lookup(identifier)
    }
}

impl<T: RegistryClient + ?Sized> RegistryClient for Box<T> {
    fn lookup(&self, identifier: &str) -> Option<SubstanceData> {
        (**self).lookup(identifier)
    }
}

/// Blocking HTTP client for the EPA Substance Registry Services REST API.
pub struct HttpRegistryClient {
    params: RegistryParams,
    client: reqwest::blocking::Client,
}

impl HttpRegistryClient {
    pub fn new(params: RegistryParams) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(params.timeout_secs))
            .user_agent(concat!("casquery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { params, client })
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    /// Single GET for `identifier`, surfacing every failure as a `RegistryError`.
    pub fn fetch(&self, identifier: &str) -> Result<Option<SubstanceData>, RegistryError> {
        let url = self.params.lookup_url(identifier);
        debug!("Querying registry: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| self.transport_error(&url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .map_err(|source| self.transport_error(&url, source))?;
        Ok(decode_first_record(&body)?)
    }

    fn transport_error(&self, url: &str, source: reqwest::Error) -> RegistryError {
        if source.is_timeout() {
            RegistryError::Timeout {
                url: url.to_string(),
                secs: self.params.timeout_secs,
            }
        } else {
            RegistryError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

impl RegistryClient for HttpRegistryClient {
    fn lookup(&self, identifier: &str) -> Option<SubstanceData> {
        match self.fetch(identifier) {
            Ok(data) => data,
            Err(e @ (RegistryError::Status { .. } | RegistryError::Decode(_))) => {
                warn!("{}", e);
                None
            }
            Err(e @ (RegistryError::Timeout { .. } | RegistryError::Transport { .. })) => {
                error!("Request error: {}", e);
                None
            }
        }
    }
}

/// Decode a registry response body (a JSON array of substances) and keep
/// the first element. The registry may return several candidates for one
/// exact-match query; only the first is used.
pub fn decode_first_record(body: &str) -> Result<Option<SubstanceData>, serde_json::Error> {
    let candidates: Vec<serde_json::Value> = serde_json::from_str(body)?;
    candidates
        .into_iter()
        .next()
        .map(serde_json::from_value)
        .transpose()
}
