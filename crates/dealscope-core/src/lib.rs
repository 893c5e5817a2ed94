pub mod config;
pub mod record;
pub mod status;
pub mod summary;

use thiserror::Error;

pub use config::{load_config, load_config_from_env, AppConfig, SiteTuning};
pub use record::{ProductRecord, Source};
pub use status::JobStatus;
pub use summary::{RunSummary, SiteFailureNote, SiteTally};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
