use std::sync::Arc;

use brazuca_core::{Config, FeedSerializer, QueryOrchestrator, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<QueryOrchestrator>,
    feed: FeedSerializer,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<QueryOrchestrator>) -> Self {
        let feed = FeedSerializer::new(config.torznab.title.clone());
        Self {
            config,
            orchestrator,
            feed,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> &QueryOrchestrator {
        self.orchestrator.as_ref()
    }

    pub fn feed(&self) -> &FeedSerializer {
        &self.feed
    }
}
