use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub torznab: TorznabConfig,
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub release_index: ReleaseIndexConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5050
}

/// Torznab endpoint behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorznabConfig {
    /// Title used for the RSS channel and the capabilities `<server>` element.
    #[serde(default = "default_title")]
    pub title: String,
    /// What to answer when a search carries no `q` or `imdbid` (and no non-movie `cat`).
    #[serde(default)]
    pub probe_response: ProbeResponse,
    /// Upper bound (and default) for the `limit` parameter.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for TorznabConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            probe_response: ProbeResponse::default(),
            max_results: default_max_results(),
        }
    }
}

fn default_title() -> String {
    "Brazuca".to_string()
}

fn default_max_results() -> u32 {
    100
}

/// Answer given to client auto-discovery probes.
///
/// Radarr and Prowlarr validate an indexer by issuing a bare search and
/// refuse to save it when the feed is empty, hence the placeholder default.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProbeResponse {
    #[default]
    Placeholder,
    Empty,
}

/// OMDb metadata service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    /// OMDb API key
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com)
    #[serde(default = "default_metadata_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_metadata_url() -> String {
    "https://www.omdbapi.com".to_string()
}

/// Release index (Stremio stream addon) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseIndexConfig {
    /// Movie stream endpoint; `{base_url}/{imdb_id}.json` is requested.
    #[serde(default = "default_release_index_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ReleaseIndexConfig {
    fn default() -> Self {
        Self {
            base_url: default_release_index_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_release_index_url() -> String {
    "https://27a5b2bfe3c0-stremio-brazilian-addon.baby-beamup.club/stream/movie".to_string()
}

fn default_timeout() -> u32 {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub torznab: TorznabConfig,
    pub metadata: SanitizedMetadataConfig,
    pub release_index: ReleaseIndexConfig,
}

/// Sanitized metadata config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMetadataConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            torznab: config.torznab.clone(),
            metadata: SanitizedMetadataConfig {
                base_url: config.metadata.base_url.clone(),
                api_key_configured: !config.metadata.api_key.is_empty(),
                timeout_secs: config.metadata.timeout_secs,
            },
            release_index: config.release_index.clone(),
        }
    }
}
