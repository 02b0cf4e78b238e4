//! Release index lookup.
//!
//! The release index maps an IMDb id to the torrents known for that movie.

mod stremio;

pub use stremio::StremioIndex;

use async_trait::async_trait;

use crate::upstream::Lookup;

/// A release as listed by the index, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelease {
    /// Single-line release title (newlines already collapsed).
    pub title: String,
    /// Lowercase hex info hash; never empty.
    pub info_hash: String,
}

/// Lists the releases available for an external id.
#[async_trait]
pub trait ReleaseIndex: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &str;

    /// List releases for `external_id`. An unknown id is `NotFound`, not an error.
    async fn list_releases(&self, external_id: &str) -> Lookup<Vec<RawRelease>>;
}

/// Join the lines of a multi-line title with single spaces.
pub fn collapse_newlines(title: &str) -> String {
    title
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
