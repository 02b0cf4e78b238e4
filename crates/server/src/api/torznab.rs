//! Torznab endpoint.
//!
//! A single GET endpoint that dispatches on the `t` parameter. Every answer,
//! including errors, is an XML document.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use brazuca_core::{SearchRequest, TorznabResponse, NO_SUCH_FUNCTION};
use tracing::{debug, error};

use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// GET /torznab/api and GET /api
pub async fn torznab_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let request = SearchRequest::from_params(&params);
    debug!(kind = request.request_type.kind(), "Torznab request");

    let response = state.orchestrator().handle(&request).await;
    let feed = state.feed();

    let (status, document) = match &response {
        TorznabResponse::Capabilities(caps) => (StatusCode::OK, feed.capabilities(caps)),
        TorznabResponse::Feed(records) => (StatusCode::OK, feed.serialize(records)),
        TorznabResponse::Unsupported { .. } => (
            StatusCode::BAD_REQUEST,
            feed.error(NO_SUCH_FUNCTION, "No such function"),
        ),
    };

    match document {
        Ok(body) => (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize Torznab response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize response: {}", e),
            )
                .into_response()
        }
    }
}
