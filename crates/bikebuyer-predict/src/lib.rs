//! Client for the remote buyer-propensity scoring service.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::PredictionClient;
pub use error::PredictError;
pub use normalize::normalize;
pub use types::{
    FeaturePayload, PredictionOutcome, PredictionResponse, PredictionResult, RawPrediction,
    Verdict,
};
