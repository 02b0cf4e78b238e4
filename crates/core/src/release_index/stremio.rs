//! Stremio stream addon used as a release index.
//!
//! The addon serves `GET {base}/{imdb_id}.json` with a `streams` array; each
//! stream carries a multi-line `title` and the torrent `infoHash`.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ReleaseIndexConfig;
use crate::upstream::{build_client, record_lookup, Lookup, UpstreamError};

use super::{collapse_newlines, RawRelease, ReleaseIndex};

const UNKNOWN_TITLE: &str = "Unknown Title";

/// Release index backed by a Stremio stream addon.
pub struct StremioIndex {
    client: Client,
    base_url: String,
}

impl StremioIndex {
    /// Create a new index client. The HTTP client is built once and reused.
    pub fn new(config: ReleaseIndexConfig) -> Result<Self, UpstreamError> {
        let client = build_client(config.timeout_secs)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the stream listing URL for an id.
    fn streams_url(&self, external_id: &str) -> String {
        format!(
            "{}/{}.json",
            self.base_url,
            urlencoding::encode(external_id)
        )
    }

    async fn fetch_streams(&self, external_id: &str) -> Result<Vec<RawRelease>, UpstreamError> {
        let url = self.streams_url(external_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                external_id = external_id,
                status = status.as_u16(),
                "Stream index returned non-success status"
            );
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body: StreamsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(normalize_streams(body.streams))
    }
}

#[async_trait]
impl ReleaseIndex for StremioIndex {
    fn name(&self) -> &str {
        "stremio"
    }

    async fn list_releases(&self, external_id: &str) -> Lookup<Vec<RawRelease>> {
        debug!(external_id = external_id, "Querying stream index");
        let started = Instant::now();

        let lookup = match self.fetch_streams(external_id).await {
            Ok(releases) => {
                debug!(
                    external_id = external_id,
                    releases = releases.len(),
                    "Stream index lookup complete"
                );
                Lookup::Found(releases)
            }
            Err(e) => {
                warn!(external_id = external_id, error = %e, "Stream index lookup failed");
                e.into()
            }
        };

        record_lookup(self.name(), started, &lookup);
        lookup
    }
}

/// Drop streams without an info hash and flatten titles to one line.
fn normalize_streams(streams: Vec<Stream>) -> Vec<RawRelease> {
    streams
        .into_iter()
        .filter_map(|stream| {
            let info_hash = stream
                .info_hash
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())?;

            let title = stream
                .title
                .map(|t| collapse_newlines(&t))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

            Some(RawRelease { title, info_hash })
        })
        .collect()
}

// Stremio addon response types
#[derive(Debug, Deserialize)]
struct StreamsResponse {
    #[serde(default)]
    streams: Vec<Stream>,
}

#[derive(Debug, Deserialize)]
struct Stream {
    title: Option<String>,
    #[serde(rename = "infoHash")]
    info_hash: Option<String>,
}
