//! Common test utilities for in-process testing with mocks.
//!
//! This module provides a test fixture that builds the full router with mock
//! upstream services injected, so Torznab scenarios run without any network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use quick_xml::events::Event;
use quick_xml::Reader;
use tower::ServiceExt;

use brazuca_core::{
    testing::{MockMetadataResolver, MockReleaseIndex},
    Config, MetadataConfig, MetadataResolver, ProbeResponse, QueryOrchestrator,
    ReleaseIndex, ReleaseIndexConfig, ServerConfig, TorznabConfig,
};
use brazuca_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use brazuca_core::testing::fixtures;

/// Test fixture with mock upstream services.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_caps() {
///     let fixture = TestFixture::new();
///     let response = fixture.get("/api?t=caps").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock metadata resolver - configure title lookups
    pub resolver: Arc<MockMetadataResolver>,
    /// Mock release index - configure stream listings
    pub index: Arc<MockReleaseIndex>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestFixture {
    /// Create a new test fixture with default Torznab settings.
    pub fn new() -> Self {
        Self::with_torznab(TorznabConfig::default())
    }

    /// Create a test fixture that answers probes with an empty feed.
    pub fn with_empty_probe() -> Self {
        Self::with_torznab(TorznabConfig {
            probe_response: ProbeResponse::Empty,
            ..Default::default()
        })
    }

    /// Create a test fixture with custom Torznab settings.
    pub fn with_torznab(torznab: TorznabConfig) -> Self {
        let resolver = Arc::new(MockMetadataResolver::new());
        let index = Arc::new(MockReleaseIndex::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 5050, // Not used for in-process testing
            },
            torznab: torznab.clone(),
            metadata: MetadataConfig {
                api_key: "test-key".to_string(),
                base_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 1,
            },
            release_index: ReleaseIndexConfig::default(),
        };

        let orchestrator = Arc::new(QueryOrchestrator::new(
            torznab,
            Arc::clone(&resolver) as Arc<dyn MetadataResolver>,
            Arc::clone(&index) as Arc<dyn ReleaseIndex>,
        ));

        let state = Arc::new(AppState::new(config, orchestrator));
        let router = create_router(state);

        Self {
            router,
            resolver,
            index,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
        }
    }
}

/// An element seen while walking an XML document.
#[derive(Debug, Clone)]
pub struct XmlTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl XmlTag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Flatten a document into its elements, in document order.
///
/// Panics if the document is not well-formed.
pub fn parse_xml(body: &str) -> Vec<XmlTag> {
    let mut reader = Reader::from_str(body);
    let mut tags: Vec<XmlTag> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                tags.push(tag_from(&e));
                open.push(tags.len() - 1);
            }
            Event::Empty(e) => tags.push(tag_from(&e)),
            Event::Text(t) => {
                let text = t.unescape().expect("valid text");
                if let Some(&idx) = open.last() {
                    tags[idx].text.push_str(text.trim());
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    tags
}

fn tag_from(e: &quick_xml::events::BytesStart<'_>) -> XmlTag {
    let attributes = e
        .attributes()
        .map(|a| {
            let a = a.expect("valid attribute");
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().expect("valid attribute value").into_owned(),
            )
        })
        .collect();

    XmlTag {
        name: String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
        attributes,
        text: String::new(),
    }
}

/// All elements with the given name.
pub fn elements<'a>(tags: &'a [XmlTag], name: &str) -> Vec<&'a XmlTag> {
    tags.iter().filter(|t| t.name == name).collect()
}

/// Value of the `torznab:attr` elements named `name`.
pub fn torznab_attrs(tags: &[XmlTag], name: &str) -> Vec<String> {
    elements(tags, "torznab:attr")
        .into_iter()
        .filter(|t| t.attr("name") == Some(name))
        .filter_map(|t| t.attr("value").map(str::to_string))
        .collect()
}
