use thiserror::Error;

/// Errors returned by the prediction client.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid prediction URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
