/// OMDb API client
///
/// A thin wrapper over one shared HTTP client. Both lookups hit the
/// same endpoint and differ only in their query parameters: `s` for a
/// title search, `i` for a single-record fetch by identifier. The API
/// reports its own failures inline via a `Response: "False"` envelope,
/// so every payload is checked before decoding the record set.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::state::data::{MovieDetail, MovieSummary};

/// Errors from a single API request
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, or protocol failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    /// The payload did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The API answered a search with `Response: "False"`
    #[error("no matches: {0}")]
    NoMatches(String),
    /// The API answered a detail lookup with `Response: "False"`
    #[error("lookup rejected: {0}")]
    Rejected(String),
}

/// Envelope around a title search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Client for the movie database API
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Build the shared HTTP client
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("movie-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(OmdbClient {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Search for titles matching `query`.
    ///
    /// Returns the entries in the order the API sent them. A negative
    /// response maps to [`FetchError::NoMatches`].
    pub async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("s", query), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        decode_search(&body)
    }

    /// Fetch the full record for one identifier.
    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("i", imdb_id), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        decode_detail(&body)
    }

    /// Download raw image bytes (posters)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Decode a search payload, honoring the inline response marker
fn decode_search(body: &str) -> Result<Vec<MovieSummary>, FetchError> {
    let envelope: SearchResponse = serde_json::from_str(body)?;

    if envelope.response == "True" {
        Ok(envelope.search)
    } else {
        Err(FetchError::NoMatches(
            envelope.error.unwrap_or_else(|| "Movie not found!".to_string()),
        ))
    }
}

/// Decode a detail payload, honoring the inline response marker
fn decode_detail(body: &str) -> Result<MovieDetail, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.get("Response").and_then(|v| v.as_str()) == Some("False") {
        let reason = value
            .get("Error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(FetchError::Rejected(reason));
    }

    Ok(serde_json::from_value(value)?)
}
