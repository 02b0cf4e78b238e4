//! Query orchestrator runner.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{ProbeResponse, TorznabConfig};
use crate::metadata::MetadataResolver;
use crate::metrics::{FEED_ITEMS, TORZNAB_REQUESTS};
use crate::release_index::{RawRelease, ReleaseIndex};
use crate::torznab::{CapabilitiesDescriptor, ReleaseRecord, RequestType, SearchRequest};
use crate::upstream::Lookup;

use super::types::TorznabResponse;

/// Turns Torznab requests into capabilities or feeds.
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct QueryOrchestrator {
    config: TorznabConfig,
    resolver: Arc<dyn MetadataResolver>,
    index: Arc<dyn ReleaseIndex>,
    capabilities: Arc<CapabilitiesDescriptor>,
}

impl QueryOrchestrator {
    pub fn new(
        config: TorznabConfig,
        resolver: Arc<dyn MetadataResolver>,
        index: Arc<dyn ReleaseIndex>,
    ) -> Self {
        let capabilities = Arc::new(CapabilitiesDescriptor::movies(
            config.title.as_str(),
            config.max_results,
        ));

        Self {
            config,
            resolver,
            index,
            capabilities,
        }
    }

    pub fn config(&self) -> &TorznabConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &CapabilitiesDescriptor {
        &self.capabilities
    }

    /// Answer one request.
    pub async fn handle(&self, request: &SearchRequest) -> TorznabResponse {
        TORZNAB_REQUESTS
            .with_label_values(&[request.request_type.kind()])
            .inc();

        match &request.request_type {
            RequestType::Capabilities => {
                debug!("Answering capabilities request");
                TorznabResponse::Capabilities(Arc::clone(&self.capabilities))
            }
            RequestType::Unsupported(function) => {
                warn!(function = %function, "Unsupported Torznab function");
                TorznabResponse::Unsupported {
                    function: function.clone(),
                }
            }
            RequestType::Search => {
                let records = self.search(request).await;
                let records = self.page(records, request);
                info!(
                    query = ?request.query,
                    imdb_id = ?request.imdb_id,
                    items = records.len(),
                    "Search complete"
                );
                FEED_ITEMS.observe(records.len() as f64);
                TorznabResponse::Feed(records)
            }
        }
    }

    async fn search(&self, request: &SearchRequest) -> Vec<ReleaseRecord> {
        debug!(
            query = ?request.query,
            imdb_id = ?request.imdb_id,
            categories = ?request.categories,
            "Handling search"
        );

        if request.excludes_movies() {
            warn!(
                categories = ?request.categories,
                "No movie category requested, returning empty feed"
            );
            return Vec::new();
        }

        let releases = if let Some(imdb_id) = &request.imdb_id {
            self.releases_for(imdb_id).await
        } else if let Some(query) = &request.query {
            match self.resolver.resolve(query).await {
                Lookup::Found(imdb_id) => self.releases_for(&imdb_id).await,
                Lookup::NotFound => {
                    warn!(
                        query = %query,
                        resolver = self.resolver.name(),
                        "No IMDb id found for query"
                    );
                    Vec::new()
                }
                Lookup::TransportError(reason) => {
                    warn!(
                        query = %query,
                        resolver = self.resolver.name(),
                        reason = %reason,
                        "Metadata lookup failed"
                    );
                    Vec::new()
                }
            }
        } else {
            return self.probe_records();
        };

        let published_at = Utc::now();
        releases
            .into_iter()
            .map(|raw| ReleaseRecord::from_raw(raw, published_at))
            .collect()
    }

    async fn releases_for(&self, imdb_id: &str) -> Vec<RawRelease> {
        let lookup = self.index.list_releases(imdb_id).await;
        if !lookup.is_found() {
            warn!(
                imdb_id = imdb_id,
                index = self.index.name(),
                outcome = lookup.outcome(),
                "No releases from index"
            );
        }
        lookup.found_or_default()
    }

    /// Answer for searches without `q` or `imdbid`.
    fn probe_records(&self) -> Vec<ReleaseRecord> {
        match self.config.probe_response {
            ProbeResponse::Placeholder => {
                warn!("Search without q or imdbid, returning placeholder item for validation");
                vec![ReleaseRecord::placeholder(Utc::now())]
            }
            ProbeResponse::Empty => {
                warn!("Search without q or imdbid, returning empty feed");
                Vec::new()
            }
        }
    }

    /// Apply Torznab `offset`/`limit`, capped at `max_results`.
    fn page(&self, records: Vec<ReleaseRecord>, request: &SearchRequest) -> Vec<ReleaseRecord> {
        let offset = request.offset.unwrap_or(0) as usize;
        let limit = request
            .limit
            .unwrap_or(self.config.max_results)
            .min(self.config.max_results) as usize;

        records.into_iter().skip(offset).take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMetadataResolver, MockReleaseIndex};
    use crate::torznab::PLACEHOLDER_TITLE;
    use std::collections::HashMap;

    struct Harness {
        orchestrator: QueryOrchestrator,
        resolver: Arc<MockMetadataResolver>,
        index: Arc<MockReleaseIndex>,
    }

    fn harness_with(config: TorznabConfig) -> Harness {
        let resolver = Arc::new(MockMetadataResolver::new());
        let index = Arc::new(MockReleaseIndex::new());
        let orchestrator = QueryOrchestrator::new(
            config,
            Arc::clone(&resolver) as Arc<dyn MetadataResolver>,
            Arc::clone(&index) as Arc<dyn ReleaseIndex>,
        );
        Harness {
            orchestrator,
            resolver,
            index,
        }
    }

    fn harness() -> Harness {
        harness_with(TorznabConfig::default())
    }

    fn request(pairs: &[(&str, &str)]) -> SearchRequest {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchRequest::from_params(&params)
    }

    #[tokio::test]
    async fn test_caps_makes_no_upstream_calls() {
        let h = harness();
        let response = h
            .orchestrator
            .handle(&request(&[("t", "caps"), ("q", "Fight Club"), ("cat", "5000")]))
            .await;

        match response {
            TorznabResponse::Capabilities(caps) => assert_eq!(caps.categories[0].id, 2000),
            other => panic!("expected capabilities, got {:?}", other),
        }
        assert!(h.resolver.calls().await.is_empty());
        assert!(h.index.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_imdbid_skips_resolution() {
        let h = harness();
        h.index
            .set_releases("tt0137523", vec![fixtures::raw_release("Fight Club 💾 1.64 GB", "abc123")])
            .await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("imdbid", "tt0137523"), ("q", "Fight Club")]))
            .await;

        let records = response.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].info_hash(), "abc123");
        assert_eq!(records[0].size_bytes(), 1_760_936_591);
        assert!(h.resolver.calls().await.is_empty());
        assert_eq!(h.index.calls().await, vec!["tt0137523".to_string()]);
    }

    #[tokio::test]
    async fn test_query_resolves_then_lists() {
        let h = harness();
        h.resolver
            .set_response("Fight Club 1999", Lookup::Found("tt0137523".to_string()))
            .await;
        h.index
            .set_releases(
                "tt0137523",
                vec![
                    fixtures::raw_release("Fight Club 720p 💾 900 MB", "aaa"),
                    fixtures::raw_release("Fight Club 2160p 💾 12 GB", "bbb"),
                ],
            )
            .await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "movie"), ("q", "Fight Club 1999"), ("cat", "2000")]))
            .await;

        let records = response.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].size_bytes(), 12_884_901_888);
        assert_eq!(h.resolver.calls().await, vec!["Fight Club 1999".to_string()]);
        assert_eq!(h.index.calls().await, vec!["tt0137523".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_resolution_is_empty_feed() {
        let h = harness();
        h.resolver
            .set_response("Alien Romulus 2024", Lookup::NotFound)
            .await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("q", "Alien Romulus 2024")]))
            .await;

        assert_eq!(response, TorznabResponse::Feed(Vec::new()));
        assert!(h.index.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_resolver_transport_error_is_empty_feed() {
        let h = harness();
        h.resolver
            .set_response("Heat", Lookup::TransportError("timed out".to_string()))
            .await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("q", "Heat")]))
            .await;

        assert_eq!(response.records().map(<[_]>::len), Some(0));
        assert!(h.index.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_is_empty_feed() {
        let h = harness();
        h.index
            .set_lookup("tt0113277", Lookup::TransportError("connection refused".to_string()))
            .await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("imdbid", "tt0113277")]))
            .await;

        assert_eq!(response.records().map(<[_]>::len), Some(0));
    }

    #[tokio::test]
    async fn test_non_movie_category_short_circuits() {
        let h = harness();
        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("cat", "5000"), ("imdbid", "tt0137523")]))
            .await;

        assert_eq!(response, TorznabResponse::Feed(Vec::new()));
        assert!(h.resolver.calls().await.is_empty());
        assert!(h.index.calls().await.is_empty());

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("cat", "5000")]))
            .await;
        assert_eq!(response, TorznabResponse::Feed(Vec::new()));
    }

    #[tokio::test]
    async fn test_bare_probe_gets_placeholder() {
        let h = harness();
        for req in [
            request(&[("t", "search")]),
            request(&[("t", "search"), ("cat", "2000")]),
        ] {
            let response = h.orchestrator.handle(&req).await;
            let records = response.records().unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].title(), PLACEHOLDER_TITLE);
        }
        assert!(h.resolver.calls().await.is_empty());
        assert!(h.index.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_imdbid_is_empty_feed() {
        let h = harness();

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("imdbid", "garbage")]))
            .await;

        assert_eq!(response, TorznabResponse::Feed(Vec::new()));
        assert_eq!(h.index.calls().await, vec!["garbage"]);
        assert!(h.resolver.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_bare_probe_empty_policy() {
        let h = harness_with(TorznabConfig {
            probe_response: ProbeResponse::Empty,
            ..TorznabConfig::default()
        });

        let response = h.orchestrator.handle(&request(&[("t", "search")])).await;
        assert_eq!(response, TorznabResponse::Feed(Vec::new()));
    }

    #[tokio::test]
    async fn test_unsupported_function() {
        let h = harness();
        let response = h
            .orchestrator
            .handle(&request(&[("t", "tvsearch"), ("q", "Lost")]))
            .await;

        assert_eq!(
            response,
            TorznabResponse::Unsupported {
                function: "tvsearch".to_string()
            }
        );
        assert!(h.resolver.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_paging() {
        let h = harness_with(TorznabConfig {
            max_results: 3,
            ..TorznabConfig::default()
        });
        let releases = (0..5)
            .map(|i| fixtures::raw_release(&format!("Release {}", i), &format!("hash{}", i)))
            .collect();
        h.index.set_releases("tt0000001", releases).await;

        let response = h
            .orchestrator
            .handle(&request(&[("t", "search"), ("imdbid", "tt0000001")]))
            .await;
        assert_eq!(response.records().unwrap().len(), 3);

        let response = h
            .orchestrator
            .handle(&request(&[
                ("t", "search"),
                ("imdbid", "tt0000001"),
                ("offset", "3"),
                ("limit", "50"),
            ]))
            .await;
        let hashes: Vec<&str> = response
            .records()
            .unwrap()
            .iter()
            .map(|r| r.info_hash())
            .collect();
        assert_eq!(hashes, vec!["hash3", "hash4"]);
    }

    #[test]
    fn test_capabilities_follow_config() {
        let h = harness_with(TorznabConfig {
            title: "Custom".to_string(),
            max_results: 42,
            ..TorznabConfig::default()
        });
        assert_eq!(h.orchestrator.capabilities().server_title, "Custom");
        assert_eq!(h.orchestrator.capabilities().limit_max, 42);
        assert_eq!(h.orchestrator.config().title, "Custom");
    }
}
