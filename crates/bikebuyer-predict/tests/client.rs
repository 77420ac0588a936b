//! Integration tests for `PredictionClient` using wiremock HTTP mocks.

use bikebuyer_predict::{FeaturePayload, PredictError, PredictionClient, PredictionOutcome};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREDICT_PATH: &str = "/public/api/v1/bikebuyer/predict";

fn test_client(server: &MockServer) -> PredictionClient {
    PredictionClient::with_url(
        &format!("{}{PREDICT_PATH}", server.uri()),
        5,
        "bikebuyer-test/0.1",
    )
    .expect("client construction should not fail")
}

fn payload() -> FeaturePayload {
    let features = json!({
        "firstName": "Marie",
        "country": "CH",
        "totalChildren": 2,
        "homeOwner": true
    });
    let serde_json::Value::Object(map) = features else {
        unreachable!("fixture is an object");
    };
    FeaturePayload::new(map)
}

#[tokio::test]
async fn predict_posts_features_verbatim_and_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(body_json(json!({
            "features": {
                "firstName": "Marie",
                "country": "CH",
                "totalChildren": 2,
                "homeOwner": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "prediction": "True",
                "probaPercentile": 91,
                "probas": { "1": 0.82, "0": 0.18 },
                "ignored": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .try_predict(&payload())
        .await
        .expect("prediction should succeed");

    assert!(result.is_positive);
    assert_eq!(result.percentile, Some(91.0));
    assert_eq!(result.probability_true, Some(0.82));
    assert_eq!(result.probability_false, Some(0.18));
}

#[tokio::test]
async fn predict_wraps_success_in_scored_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": { "prediction": 0 } })),
        )
        .mount(&server)
        .await;

    let outcome = test_client(&server).predict(&payload()).await;
    assert!(outcome.is_ok());
    let result = outcome.result().expect("scored outcome carries a result");
    assert!(!result.is_positive);
    assert!(result.probability_true.is_none());
}

#[tokio::test]
async fn server_error_becomes_failed_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.try_predict(&payload()).await.unwrap_err();
    assert!(
        matches!(err, PredictError::UnexpectedStatus { status: 502, .. }),
        "expected UnexpectedStatus(502), got: {err:?}"
    );

    let outcome = client.predict(&payload()).await;
    assert_eq!(outcome, PredictionOutcome::Failed);
    assert!(!outcome.is_ok());
    assert!(outcome.result().is_none());
}

#[tokio::test]
async fn malformed_body_becomes_failed_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.try_predict(&payload()).await.unwrap_err();
    assert!(matches!(err, PredictError::Deserialize { .. }));
    assert_eq!(client.predict(&payload()).await, PredictionOutcome::Failed);
}

#[tokio::test]
async fn unreachable_service_becomes_failed_outcome() {
    let client = PredictionClient::with_url("http://127.0.0.1:1/predict", 1, "bikebuyer-test/0.1")
        .expect("client construction should not fail");
    assert_eq!(client.predict(&payload()).await, PredictionOutcome::Failed);
}

#[tokio::test]
async fn drifted_figures_still_score_the_verdict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "prediction": true,
                "probaPercentile": "87",
                "probas": { "1": "0.82", "0": "0.18" },
                "ignored": "no"
            }
        })))
        .mount(&server)
        .await;

    let outcome = test_client(&server).predict(&payload()).await;
    let result = outcome.result().copied().expect("drifted figures must not fail the call");
    assert!(result.is_positive);
    assert_eq!(result.percentile, Some(87.0));
    assert_eq!(result.probability_true, Some(0.82));
    assert_eq!(result.probability_false, Some(0.18));
}

#[tokio::test]
async fn empty_result_is_negative_not_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let outcome = test_client(&server).predict(&payload()).await;
    let result = outcome.result().copied().expect("decoded body is scored");
    assert!(!result.is_positive);
    assert!(result.percentile.is_none());
}

#[test]
fn invalid_url_is_rejected() {
    let err = PredictionClient::with_url("::nope::", 5, "ua").unwrap_err();
    assert!(matches!(err, PredictError::InvalidUrl { .. }));
}

#[test]
fn default_client_targets_configured_default_endpoint() {
    assert!(PredictionClient::new(5, "ua").is_ok());
    assert!(bikebuyer_core::config::DEFAULT_PREDICT_URL.ends_with("/predict"));
}
