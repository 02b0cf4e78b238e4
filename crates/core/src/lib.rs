pub mod config;
pub mod metadata;
pub mod metrics;
pub mod orchestrator;
pub mod release_index;
pub mod testing;
pub mod torznab;
pub mod upstream;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MetadataConfig,
    ProbeResponse, ReleaseIndexConfig, SanitizedConfig, ServerConfig, TorznabConfig,
};
pub use metadata::{strip_trailing_year, MetadataResolver, OmdbResolver};
pub use orchestrator::{QueryOrchestrator, TorznabResponse};
pub use release_index::{RawRelease, ReleaseIndex, StremioIndex};
pub use torznab::{
    parse_size, CapabilitiesDescriptor, FeedError, FeedSerializer, ReleaseRecord, RequestType,
    SearchRequest, NO_SUCH_FUNCTION,
};
pub use upstream::{Lookup, UpstreamError};
