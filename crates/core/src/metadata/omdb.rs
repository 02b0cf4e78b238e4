//! OMDb (Open Movie Database) resolver.
//!
//! Uses the title lookup endpoint (`?t=`), which returns the single best match.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::MetadataConfig;
use crate::upstream::{build_client, record_lookup, Lookup, UpstreamError};

use super::{strip_trailing_year, MetadataResolver};

/// OMDb title -> IMDb id resolver.
pub struct OmdbResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbResolver {
    /// Create a new resolver. The HTTP client is built once and reused.
    pub fn new(config: MetadataConfig) -> Result<Self, UpstreamError> {
        let client = build_client(config.timeout_secs)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn fetch_imdb_id(&self, title: &str) -> Result<Option<String>, UpstreamError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "OMDb returned non-success status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body: OmdbResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if !body.response.eq_ignore_ascii_case("true") {
            warn!(
                title = title,
                error = body.error.as_deref().unwrap_or("unknown"),
                "OMDb did not find movie"
            );
            return Ok(None);
        }

        Ok(body.imdb_id.filter(|id| !id.trim().is_empty()))
    }
}

#[async_trait]
impl MetadataResolver for OmdbResolver {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn resolve(&self, title: &str) -> Lookup<String> {
        let cleaned = strip_trailing_year(title);
        if cleaned.is_empty() {
            warn!(title = title, "Nothing left to look up after stripping the year");
            return Lookup::NotFound;
        }

        debug!(title = cleaned, "Querying OMDb");
        let started = Instant::now();

        let lookup = match self.fetch_imdb_id(cleaned).await {
            Ok(Some(imdb_id)) => {
                debug!(title = cleaned, imdb_id = %imdb_id, "OMDb resolved IMDb id");
                Lookup::Found(imdb_id)
            }
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                warn!(title = cleaned, error = %e, "OMDb lookup failed");
                e.into()
            }
        };

        record_lookup(self.name(), started, &lookup);
        lookup
    }
}

// OMDb API response type
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}
