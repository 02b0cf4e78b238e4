//! Mock release index for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::release_index::{RawRelease, ReleaseIndex};
use crate::upstream::Lookup;

/// Mock implementation of the ReleaseIndex trait.
///
/// Answers from an id -> lookup table (`NotFound` for unknown ids) and
/// records every id it was asked about.
#[derive(Debug, Default)]
pub struct MockReleaseIndex {
    listings: Arc<RwLock<HashMap<String, Lookup<Vec<RawRelease>>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockReleaseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the releases listed for an id.
    pub async fn set_releases(&self, external_id: &str, releases: Vec<RawRelease>) {
        self.set_lookup(external_id, Lookup::Found(releases)).await;
    }

    /// Configure an arbitrary outcome for an id.
    pub async fn set_lookup(&self, external_id: &str, lookup: Lookup<Vec<RawRelease>>) {
        self.listings
            .write()
            .await
            .insert(external_id.to_string(), lookup);
    }

    /// Ids passed to `list_releases`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl ReleaseIndex for MockReleaseIndex {
    fn name(&self) -> &str {
        "mock-index"
    }

    async fn list_releases(&self, external_id: &str) -> Lookup<Vec<RawRelease>> {
        self.calls.write().await.push(external_id.to_string());
        self.listings
            .read()
            .await
            .get(external_id)
            .cloned()
            .unwrap_or(Lookup::NotFound)
    }
}
