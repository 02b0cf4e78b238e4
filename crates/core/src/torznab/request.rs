//! Inbound Torznab request classification.

use std::collections::{BTreeSet, HashMap};

use super::is_movie_category;

/// What a Torznab request asks for, derived from its `t` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestType {
    /// `t=caps`
    Capabilities,
    /// `t=search` or `t=movie`
    Search,
    /// Any other function token, including a missing one.
    Unsupported(String),
}

impl RequestType {
    pub fn classify(function: Option<&str>) -> Self {
        match function.map(str::trim) {
            Some("caps") => RequestType::Capabilities,
            Some("search") | Some("movie") => RequestType::Search,
            other => RequestType::Unsupported(other.unwrap_or_default().to_string()),
        }
    }

    /// Metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestType::Capabilities => "caps",
            RequestType::Search => "search",
            RequestType::Unsupported(_) => "unsupported",
        }
    }
}

/// A classified Torznab request.
///
/// Holds only what the client sent; blank parameters count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub request_type: RequestType,
    /// Free-text title (`q`).
    pub query: Option<String>,
    /// External IMDb id (`imdbid`); numeric ids are `tt`-prefixed.
    pub imdb_id: Option<String>,
    /// Requested category codes (`cat`).
    pub categories: BTreeSet<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchRequest {
    /// Build a request from raw query-string parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let value = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let categories = value("cat")
            .map(|cats| {
                cats.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            request_type: RequestType::classify(value("t")),
            query: value("q").map(str::to_string),
            imdb_id: value("imdbid").map(normalize_imdb_id),
            categories,
            offset: value("offset").and_then(|v| v.parse().ok()),
            limit: value("limit").and_then(|v| v.parse().ok()),
        }
    }

    /// A request that names neither a title nor an id.
    pub fn has_identifier(&self) -> bool {
        self.query.is_some() || self.imdb_id.is_some()
    }

    /// The client restricted categories and none of them is a movie category.
    pub fn excludes_movies(&self) -> bool {
        !self.categories.is_empty() && !self.categories.iter().any(|c| is_movie_category(c))
    }
}

/// Normalize an IMDb id: numeric ids get the `tt` prefix.
///
/// Ids in any other shape are kept verbatim; the release index decides
/// whether it knows them.
pub fn normalize_imdb_id(raw: &str) -> String {
    let raw = raw.trim();
    let digits = match raw.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tt") => &raw[2..],
        _ => raw,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }

    format!("tt{}", digits)
}
