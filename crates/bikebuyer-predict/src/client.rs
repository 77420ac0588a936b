//! HTTP client for the scoring service's `predict` endpoint.

use std::time::Duration;

use bikebuyer_core::config::DEFAULT_PREDICT_URL;
use reqwest::{Client, Url};

use crate::error::PredictError;
use crate::normalize::normalize;
use crate::types::{FeaturePayload, PredictionOutcome, PredictionResponse, PredictionResult};

/// Client for the scoring service.
///
/// The endpoint is unauthenticated. Use [`PredictionClient::new`] for
/// production or [`PredictionClient::with_url`] to point at a mock server.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    url: Url,
}

impl PredictionClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PredictError> {
        Self::with_url(DEFAULT_PREDICT_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PredictError::InvalidUrl`] if `url` does
    /// not parse.
    pub fn with_url(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PredictError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let url = Url::parse(url).map_err(|e| PredictError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, url })
    }

    /// Scores one feature payload.
    ///
    /// # Errors
    ///
    /// - [`PredictError::Http`] on network failure or timeout.
    /// - [`PredictError::UnexpectedStatus`] for any non-2xx status.
    /// - [`PredictError::Deserialize`] if the body is not JSON or its
    ///   fields have unusable types.
    pub async fn try_predict(
        &self,
        payload: &FeaturePayload,
    ) -> Result<PredictionResult, PredictError> {
        tracing::debug!(
            features = payload.features.len(),
            "requesting prediction"
        );

        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<PredictionResponse>(&body).map_err(|e| {
            PredictError::Deserialize {
                context: "prediction response".to_owned(),
                source: e,
            }
        })?;

        Ok(normalize(&parsed))
    }

    /// Scores one feature payload, downgrading every failure to
    /// [`PredictionOutcome::Failed`].
    pub async fn predict(&self, payload: &FeaturePayload) -> PredictionOutcome {
        match self.try_predict(payload).await {
            Ok(result) => PredictionOutcome::Scored(result),
            Err(e) => {
                tracing::warn!(error = %e, "prediction failed");
                PredictionOutcome::Failed
            }
        }
    }
}
