//! Torznab capabilities descriptor.

use super::{MOVIE_CATEGORY, MOVIE_HD_CATEGORY, MOVIE_UHD_CATEGORY};

/// A search function advertised under `<searching>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMode {
    /// Element name, e.g. `movie-search`.
    pub name: &'static str,
    pub available: bool,
    /// Comma separated parameter names.
    pub supported_params: &'static str,
}

/// A category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub subcategories: Vec<CategoryDescriptor>,
}

/// What this indexer can do; built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitiesDescriptor {
    pub server_title: String,
    pub limit_max: u32,
    pub limit_default: u32,
    pub searching: Vec<SearchMode>,
    pub categories: Vec<CategoryDescriptor>,
}

impl CapabilitiesDescriptor {
    /// Movie-only capabilities.
    pub fn movies(server_title: impl Into<String>, max_results: u32) -> Self {
        Self {
            server_title: server_title.into(),
            limit_max: max_results,
            limit_default: max_results,
            searching: vec![
                SearchMode {
                    name: "search",
                    available: true,
                    supported_params: "q",
                },
                SearchMode {
                    name: "tv-search",
                    available: false,
                    supported_params: "q",
                },
                SearchMode {
                    name: "movie-search",
                    available: true,
                    supported_params: "q,imdbid",
                },
            ],
            categories: vec![CategoryDescriptor {
                id: MOVIE_CATEGORY,
                name: "Movies",
                subcategories: vec![
                    CategoryDescriptor {
                        id: MOVIE_HD_CATEGORY,
                        name: "Movies/HD",
                        subcategories: Vec::new(),
                    },
                    CategoryDescriptor {
                        id: MOVIE_UHD_CATEGORY,
                        name: "Movies/UHD",
                        subcategories: Vec::new(),
                    },
                ],
            }],
        }
    }
}
