//! Query orchestrator.
//!
//! Interprets a classified Torznab request, decides which upstream services to
//! call and in what order, and applies the fallback policy:
//! - **caps**: answered from the static descriptor, no upstream calls
//! - **search**: `imdbid` goes straight to the release index, `q` is resolved
//!   through the metadata service first, bare probes get the configured answer
//! - **unsupported**: reported back so the HTTP layer can answer 400

mod runner;
mod types;

pub use runner::QueryOrchestrator;
pub use types::TorznabResponse;
