//! Shared plumbing for the two upstream HTTP collaborators.
//!
//! Both clients fold every failure into [`Lookup`] so callers can express
//! their fallback chain as plain matching instead of error handling.

use std::time::{Duration, Instant};

use reqwest::Client;
use thiserror::Error;

use crate::metrics::{UPSTREAM_DURATION, UPSTREAM_REQUESTS};

/// Outcome of a single upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The service answered with a usable value.
    Found(T),
    /// The service answered, but has nothing for this key.
    NotFound,
    /// The service could not be reached or its answer could not be read.
    TransportError(String),
}

impl<T> Lookup<T> {
    /// Returns the found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::TransportError(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::NotFound => "not_found",
            Lookup::TransportError(_) => "transport_error",
        }
    }
}

impl<T: Default> Lookup<T> {
    /// Collapses absence and failure into the default value.
    pub fn found_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// Errors raised inside the upstream clients before they are folded into a [`Lookup`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_connect() {
            UpstreamError::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else if e.is_builder() {
            UpstreamError::Client(e.to_string())
        } else {
            UpstreamError::ConnectionFailed(e.to_string())
        }
    }
}

impl<T> From<UpstreamError> for Lookup<T> {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Status { .. } => Lookup::NotFound,
            other => Lookup::TransportError(other.to_string()),
        }
    }
}

/// Build the HTTP client used by an upstream collaborator.
///
/// The client is created once and shared by every request; the timeout bounds
/// the whole call, connect included.
pub(crate) fn build_client(timeout_secs: u32) -> Result<Client, UpstreamError> {
    Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_secs)))
        .user_agent(concat!("brazuca-torznab/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| UpstreamError::Client(e.to_string()))
}

/// Record the outcome and latency of one upstream call.
pub(crate) fn record_lookup<T>(service: &str, started: Instant, lookup: &Lookup<T>) {
    UPSTREAM_DURATION
        .with_label_values(&[service])
        .observe(started.elapsed().as_secs_f64());
    UPSTREAM_REQUESTS
        .with_label_values(&[service, lookup.outcome()])
        .inc();
}
