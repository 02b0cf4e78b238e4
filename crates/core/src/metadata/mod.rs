//! Movie metadata resolution.
//!
//! Turns the free-text title of a Torznab query into the IMDb identifier the
//! release index is keyed on.

mod omdb;

pub use omdb::OmdbResolver;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::upstream::Lookup;

/// Resolves a movie title to its external (IMDb) identifier.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &str;

    /// Look up the identifier for `title`.
    ///
    /// A trailing release year is ignored, since the service matches on title only.
    async fn resolve(&self, title: &str) -> Lookup<String>;
}

static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\d{4}$").unwrap());

/// Remove a trailing four-digit year, e.g. `"Alien Romulus 2024"` -> `"Alien Romulus"`.
pub fn strip_trailing_year(title: &str) -> &str {
    let trimmed = title.trim();
    match TRAILING_YEAR.find(trimmed) {
        Some(m) => trimmed[..m.start()].trim_end(),
        None => trimmed,
    }
}
