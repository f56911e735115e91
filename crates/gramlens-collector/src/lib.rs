pub mod collect;
pub mod discovery;
pub mod error;
mod parse;
pub mod resolve;

pub use collect::{CollectParams, Collector, CollectorTuning};
pub use discovery::{CompetitorSource, DiscoveryQuery, KeywordRanked, StaticRoster};
pub use error::CollectorError;
pub use resolve::{normalize_handle, profile_url, resolve_target};
