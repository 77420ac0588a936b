//! Scoring service request/response types.
//!
//! ## Observed shape
//!
//! `POST .../predict` with `{"features": {...}}` answers
//! `{"result": {"prediction": ..., "probaPercentile": 87, "probas": {...}}}`.
//!
//! The verdict's JSON type has drifted between model deployments: a
//! boolean, the strings `"True"`/`"false"`/`"1"`, or the numbers `1`/`0`.
//! The probability map is keyed either `"true"`/`"false"` or `"1"`/`"0"`,
//! occasionally with other casings, and figures sometimes arrive as
//! numeric strings. [`Verdict`] keeps the raw shape so [`crate::normalize`]
//! can reduce it with an exhaustive match. The figures stay untyped JSON:
//! a figure of the wrong type still decodes and is read as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body: the feature map is sent verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeaturePayload {
    pub features: Map<String, Value>,
}

impl FeaturePayload {
    #[must_use]
    pub fn new(features: Map<String, Value>) -> Self {
        Self { features }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub result: Option<RawPrediction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub prediction: Option<Verdict>,

    /// Kept as raw JSON: numbers and numeric strings have both been seen.
    #[serde(default, rename = "probaPercentile")]
    pub proba_percentile: Option<Value>,

    /// Class probabilities, normally an object of numbers. Any other shape
    /// is read as absent.
    #[serde(default)]
    pub probas: Option<Value>,
}

/// Raw verdict as sent by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Verdict {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays, objects, or anything else the service may start sending.
    Other(Value),
}

/// Verdict and confidence figures, independent of the raw response shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PredictionResult {
    pub is_positive: bool,
    pub percentile: Option<f64>,
    pub probability_true: Option<f64>,
    pub probability_false: Option<f64>,
}

/// What callers see for one submission.
///
/// A failed call carries no numbers at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionOutcome {
    Scored(PredictionResult),
    Failed,
}

impl PredictionOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, PredictionOutcome::Scored(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionOutcome::Scored(result) => Some(result),
            PredictionOutcome::Failed => None,
        }
    }
}
