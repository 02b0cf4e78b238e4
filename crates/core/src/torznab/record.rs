//! Normalized release records.

use chrono::{DateTime, Utc};

use crate::release_index::RawRelease;

use super::{parse_size, MOVIE_CATEGORY};

/// Title of the record returned to validation probes.
pub const PLACEHOLDER_TITLE: &str = "Dummy Movie - Test";
/// Info hash of the record returned to validation probes.
pub const PLACEHOLDER_INFO_HASH: &str = "0123456789abcdef0123456789abcdef01234567";

/// A release ready to be rendered as a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    title: String,
    link: String,
    info_hash: String,
    published_at: DateTime<Utc>,
    category: u32,
    size_bytes: u64,
}

impl ReleaseRecord {
    /// Normalize a raw index entry.
    pub fn from_raw(raw: RawRelease, published_at: DateTime<Utc>) -> Self {
        let size_bytes = parse_size(&raw.title);
        let link = magnet_link(&raw.info_hash, Some(&raw.title));

        Self {
            title: raw.title,
            link,
            info_hash: raw.info_hash,
            published_at,
            category: MOVIE_CATEGORY,
            size_bytes,
        }
    }

    /// The fixed record answered to client auto-discovery probes.
    pub fn placeholder(published_at: DateTime<Utc>) -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            link: magnet_link(PLACEHOLDER_INFO_HASH, None),
            info_hash: PLACEHOLDER_INFO_HASH.to_string(),
            published_at,
            category: MOVIE_CATEGORY,
            size_bytes: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Magnet link for the release.
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn info_hash(&self) -> &str {
        &self.info_hash
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn category(&self) -> u32 {
        self.category
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Build a magnet link: `magnet:?xt=urn:btih:{hash}&dn={title}`.
pub fn magnet_link(info_hash: &str, display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            info_hash,
            urlencoding::encode(name)
        ),
        None => format!("magnet:?xt=urn:btih:{}", info_hash),
    }
}
