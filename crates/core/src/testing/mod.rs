//! Testing utilities and mock implementations of the upstream collaborators.
//!
//! # Example
//!
//! ```rust,ignore
//! use brazuca_core::testing::{fixtures, MockMetadataResolver, MockReleaseIndex};
//!
//! let resolver = MockMetadataResolver::new();
//! let index = MockReleaseIndex::new();
//!
//! resolver.set_response("Fight Club", Lookup::Found("tt0137523".into())).await;
//! index.set_releases("tt0137523", vec![fixtures::raw_release("Fight Club 💾 1.64 GB", "abc123")]).await;
//!
//! // Hand both to a QueryOrchestrator...
//! ```

mod mock_metadata;
mod mock_release_index;

pub use mock_metadata::MockMetadataResolver;
pub use mock_release_index::MockReleaseIndex;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::release_index::RawRelease;

    /// A raw release as the index would list it.
    pub fn raw_release(title: &str, info_hash: &str) -> RawRelease {
        RawRelease {
            title: title.to_string(),
            info_hash: info_hash.to_string(),
        }
    }

    /// The Fight Club release used across scenarios.
    pub fn fight_club_release() -> RawRelease {
        raw_release("Fight Club 💾 1.64 GB", "abc123")
    }

    /// Stremio stream listing body for the given `(title, info_hash)` pairs.
    pub fn streams_json(streams: &[(&str, &str)]) -> serde_json::Value {
        serde_json::json!({
            "streams": streams
                .iter()
                .map(|(title, hash)| serde_json::json!({ "title": title, "infoHash": hash }))
                .collect::<Vec<_>>()
        })
    }
}
