pub mod app_config;
pub mod config;
pub mod ids;
pub mod model;
pub mod roster;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use ids::{IdGenerator, UuidIdGenerator};
pub use model::{
    AnalyzeReport, Artifact, BrandDna, CollectedBatch, CompetitorInsight, GeneratedPost,
    truncate_chars, InaccessibleReason, MediaType, ReportMetadata, TargetResolution,
    CAPTION_MAX_CHARS,
};
pub use roster::{load_roster, CompetitorEntry, CompetitorRoster};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read competitor roster at {path}: {source}")]
    RosterIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse competitor roster: {0}")]
    RosterParse(#[from] serde_yaml::Error),

    #[error("{0}")]
    Validation(String),
}
