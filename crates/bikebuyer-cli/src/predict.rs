//! `predict` command: build a feature payload, score it, record it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bikebuyer_core::{AppConfig, CustomerProfile};
use bikebuyer_history::{HistoryStore, NewHistoryEntry};
use bikebuyer_predict::{FeaturePayload, PredictionClient, PredictionResult};
use chrono::Local;
use serde_json::{Map, Value};

#[derive(Debug)]
pub(crate) enum PredictInput {
    Profile(PathBuf),
    Features(PathBuf),
}

/// Scores one submission and prints the canonical result.
///
/// # Errors
///
/// Returns an error if the input file cannot be read, the prediction call
/// fails, or the history file cannot be written.
pub(crate) async fn run_predict(
    config: &AppConfig,
    input: &PredictInput,
    record_history: bool,
) -> anyhow::Result<()> {
    let (payload, identity) = match input {
        PredictInput::Profile(path) => {
            let profile: CustomerProfile = read_json(path)?;
            let features = profile.to_features(Local::now().date_naive())?;
            let identity = NewHistoryEntry {
                first_name: profile.first_name,
                last_name: profile.last_name,
                email: profile.email_address,
                ..NewHistoryEntry::default()
            };
            (FeaturePayload::new(features), identity)
        }
        PredictInput::Features(path) => {
            let features: Map<String, Value> = read_json(path)?;
            let identity = identity_from_features(&features);
            (FeaturePayload::new(features), identity)
        }
    };

    let client = PredictionClient::with_url(
        &config.predict_url,
        config.http_timeout_secs,
        &config.user_agent,
    )?;
    let outcome = client.predict(&payload).await;
    let Some(result) = outcome.result().copied() else {
        anyhow::bail!("prediction failed");
    };

    print_result(&result);

    if record_history {
        let mut store = HistoryStore::open(&config.history_path);
        store.add(NewHistoryEntry {
            is_buyer: result.is_positive,
            percentile: result.percentile,
            ..identity
        })?;
        tracing::info!(path = %store.path().display(), "submission recorded");
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let body =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("parsing {}", path.display()))
}

/// Pulls the history identity out of a raw feature map; missing or
/// non-string fields become empty strings.
fn identity_from_features(features: &Map<String, Value>) -> NewHistoryEntry {
    let text = |key: &str| {
        features
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    NewHistoryEntry {
        first_name: text("firstName"),
        last_name: text("lastName"),
        email: text("emailAddress"),
        ..NewHistoryEntry::default()
    }
}

fn print_result(result: &PredictionResult) {
    let verdict = if result.is_positive {
        "likely buyer"
    } else {
        "unlikely buyer"
    };
    println!("verdict:     {verdict}");
    println!("percentile:  {}", fmt_figure(result.percentile));
    println!("p(true):     {}", fmt_figure(result.probability_true));
    println!("p(false):    {}", fmt_figure(result.probability_false));
}

/// Format an optional figure for display, or a dash when `None`.
pub(crate) fn fmt_figure(value: Option<f64>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| format!("{v:.2}"))
}
