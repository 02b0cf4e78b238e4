//! Mock metadata resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metadata::MetadataResolver;
use crate::upstream::Lookup;

/// Mock implementation of the MetadataResolver trait.
///
/// Answers from a title -> lookup table (`NotFound` for unknown titles) and
/// records every title it was asked about.
#[derive(Debug, Default)]
pub struct MockMetadataResolver {
    responses: Arc<RwLock<HashMap<String, Lookup<String>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the answer for an exact title.
    pub async fn set_response(&self, title: &str, lookup: Lookup<String>) {
        self.responses
            .write()
            .await
            .insert(title.to_string(), lookup);
    }

    /// Titles passed to `resolve`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl MetadataResolver for MockMetadataResolver {
    fn name(&self) -> &str {
        "mock-metadata"
    }

    async fn resolve(&self, title: &str) -> Lookup<String> {
        self.calls.write().await.push(title.to_string());
        self.responses
            .read()
            .await
            .get(title)
            .cloned()
            .unwrap_or(Lookup::NotFound)
    }
}
