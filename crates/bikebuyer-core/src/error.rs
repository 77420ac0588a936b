use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid country code \"{0}\": expected two ASCII letters")]
    InvalidCountry(String),

    #[error("feature serialization failed: {0}")]
    Features(#[from] serde_json::Error),

    #[error("customer profile did not serialize to a JSON object")]
    FeatureShape,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
