//! Reduction of a raw [`PredictionResponse`] to a [`PredictionResult`].
//!
//! Normalization never fails: a missing or unrecognised verdict is read as
//! negative, and figures that cannot be located or read as a number are
//! left as `None`.

use serde_json::{Map, Value};

use crate::types::{PredictionResponse, PredictionResult, Verdict};

/// Normalizes a decoded scoring response.
#[must_use]
pub fn normalize(response: &PredictionResponse) -> PredictionResult {
    let Some(raw) = response.result.as_ref() else {
        return PredictionResult::default();
    };

    let probas = raw.probas.as_ref().and_then(Value::as_object);
    PredictionResult {
        is_positive: raw.prediction.as_ref().is_some_and(is_positive),
        percentile: raw.proba_percentile.as_ref().and_then(figure),
        probability_true: probas.and_then(|p| class_probability(p, "true", "1")),
        probability_false: probas.and_then(|p| class_probability(p, "false", "0")),
    }
}

/// Positive iff the verdict is `true`, the string `"true"` (any case) or
/// `"1"`, or exactly the number `1`.
#[must_use]
pub fn is_positive(verdict: &Verdict) -> bool {
    match verdict {
        Verdict::Bool(b) => *b,
        Verdict::Text(s) => s.eq_ignore_ascii_case("true") || s == "1",
        #[allow(clippy::float_cmp)]
        Verdict::Number(n) => *n == 1.0,
        Verdict::Other(_) => false,
    }
}

/// Looks up a class probability by its exact word key, then its exact
/// digit key, then any key matching the word case-insensitively.
fn class_probability(probas: &Map<String, Value>, word: &str, digit: &str) -> Option<f64> {
    probas
        .get(word)
        .and_then(figure)
        .or_else(|| probas.get(digit).and_then(figure))
        .or_else(|| {
            probas
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(word))
                .find_map(|(_, value)| figure(value))
        })
}

/// A finite number, or a string holding one.
fn figure(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
