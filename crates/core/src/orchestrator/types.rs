//! Types for the query orchestrator.

use std::sync::Arc;

use crate::torznab::{CapabilitiesDescriptor, ReleaseRecord};

/// What the orchestrator decided to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorznabResponse {
    /// The capabilities document.
    Capabilities(Arc<CapabilitiesDescriptor>),
    /// A result feed, possibly empty.
    Feed(Vec<ReleaseRecord>),
    /// The request named a function this indexer does not implement.
    Unsupported { function: String },
}

impl TorznabResponse {
    /// Feed records, if this is a feed.
    pub fn records(&self) -> Option<&[ReleaseRecord]> {
        match self {
            TorznabResponse::Feed(records) => Some(records),
            _ => None,
        }
    }
}
