//! Shared domain types and configuration for the prospector workspace.

pub mod analysis;
pub mod app_config;
pub mod companies;
pub mod config;
pub mod roi;
pub mod scorecard;

use thiserror::Error;

pub use analysis::{
    AggregatedData, AggregatedSignal, BatchEmailResult, BatchEntity, CompanyAnalysis,
    DecisionMaker, DEGRADED_OUTREACH_ANGLE, DEGRADED_PAIN_POINT, DEGRADED_PROFILE,
    DEGRADED_TECH_STACK, UNKNOWN_TECH_STACK,
};
pub use app_config::{AppConfig, Environment};
pub use companies::{load_catalog, CompanyCatalog, CompanyProfile, CompanyType, OutreachSegment};
pub use config::{load_app_config, load_app_config_from_env};
pub use roi::{estimate_roi, RoiEstimate, RoiInputs};
pub use scorecard::{score_prospect, ScoreCard, ScoreItem};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read company catalog at {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse company catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("company catalog validation failed: {0}")]
    Validation(String),
}
