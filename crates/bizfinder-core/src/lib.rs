pub mod app_config;
pub mod business;
pub mod config;
pub mod request;

pub use app_config::AppConfig;
pub use business::{display_or_unspecified, BusinessRecord, UNSPECIFIED};
pub use config::{load_app_config, load_app_config_from_env};
pub use request::{RequestError, SearchRequest, DEFAULT_LOCATION};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
