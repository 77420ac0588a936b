//! Shared domain types and configuration for the bike-buyer registration
//! assistant.

pub mod app_config;
pub mod config;
pub mod country;
pub mod error;
pub mod household;
pub mod profile;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use country::CountryCode;
pub use error::{ConfigError, CoreError};
pub use household::infer_divorced;
pub use profile::{age_on, CustomerProfile, MaritalStatus};
