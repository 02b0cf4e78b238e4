//! Torznab translation layer.
//!
//! Request classification, release normalization and the RSS/Torznab wire
//! format. Nothing in here performs I/O.

mod caps;
mod feed;
mod record;
mod request;
mod size;

pub use caps::{CapabilitiesDescriptor, CategoryDescriptor, SearchMode};
pub use feed::{FeedError, FeedSerializer, XmlElement, XmlNode, NO_SUCH_FUNCTION};
pub use record::{magnet_link, ReleaseRecord, PLACEHOLDER_INFO_HASH, PLACEHOLDER_TITLE};
pub use request::{normalize_imdb_id, RequestType, SearchRequest};
pub use size::parse_size;

/// Newznab/Torznab top-level movie category.
pub const MOVIE_CATEGORY: u32 = 2000;
/// Movies/HD subcategory.
pub const MOVIE_HD_CATEGORY: u32 = 2040;
/// Movies/UHD subcategory.
pub const MOVIE_UHD_CATEGORY: u32 = 2045;

/// Whether a category code belongs to the movie family (2000 and its subcategories).
pub fn is_movie_category(code: &str) -> bool {
    code.trim()
        .parse::<u32>()
        .map(|id| (MOVIE_CATEGORY..MOVIE_CATEGORY + 1000).contains(&id))
        .unwrap_or(false)
}
