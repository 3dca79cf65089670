//! Integration tests for the predict + chat HTTP API.
//!
//! Each test spins up the Axum server on a random port, points the
//! prediction orchestrator at a fake classifier shell script, and exercises
//! the real HTTP contract with reqwest.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;

use phishguard::chat::Dispatcher;
use phishguard::classifier::ProcessClassifier;
use phishguard::http::{AppState, api_routes};
use phishguard::predict::Predictor;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Write a fake classifier script; the URL arrives as `$1`.
fn fake_classifier(dir: &tempfile::TempDir, body: &str) -> ProcessClassifier {
    let path = dir.path().join("classifier.sh");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", body).unwrap();
    ProcessClassifier::new("sh", vec![path.to_string_lossy().into_owned()])
}

/// Start the server on a random port, return its base URL.
async fn start_server(classifier: ProcessClassifier) -> String {
    let state = AppState {
        predictor: Arc::new(Predictor::new(Arc::new(classifier))),
        dispatcher: Arc::new(Dispatcher::with_default_rules()),
    };
    let app = api_routes(state, "*");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(&dir, "exit 0")).await;

        let body: serde_json::Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn predict_returns_normalized_result() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        // Percentage-scale confidence, as the deployed classifier emits.
        let base = start_server(fake_classifier(
            &dir,
            r#"printf '{"url":"%s","prediction":"phishing","confidence":93.0}' "$1""#,
        ))
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/predict", base))
            .json(&serde_json::json!({"url": "http://paypal-login-secure.com"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["prediction"], "phishing");
        assert_eq!(body["confidence"], 0.93);
        assert_eq!(body["url"], "http://paypal-login-secure.com");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn predict_rejects_blank_url_with_400() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        // A script that would fail loudly if it were ever spawned.
        let base = start_server(fake_classifier(&dir, "echo should-not-run >&2; exit 7")).await;

        for url in ["", "   "] {
            let response = reqwest::Client::new()
                .post(format!("{}/api/predict", base))
                .json(&serde_json::json!({"url": url}))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 400);

            let body: serde_json::Value = response.json().await.unwrap();
            assert_eq!(body["error"], "URL is required.");
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn predict_maps_process_failure_to_500() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(
            &dir,
            r#"printf '{"prediction":"phishing","confidence":0.9}'; exit 1"#,
        ))
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/predict", base))
            .json(&serde_json::json!({"url": "https://example.com"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Prediction failed.");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn predict_treats_stderr_as_failure_despite_exit_zero() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(
            &dir,
            r#"printf '{"prediction":"legitimate","confidence":0.8}'; echo 'FutureWarning: deprecated' >&2; exit 0"#,
        ))
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/predict", base))
            .json(&serde_json::json!({"url": "https://example.com"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);

        let body: serde_json::Value = response.json().await.unwrap();
        // Diagnostic content stays in the logs, never in the response.
        assert_eq!(body["error"], "Prediction failed.");
        assert!(!body.to_string().contains("FutureWarning"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn predict_distinguishes_malformed_output() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(&dir, "printf 'not json'")).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/predict", base))
            .json(&serde_json::json!({"url": "https://example.com"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid prediction output.");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn concurrent_predictions_stay_independent() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        // Echoes its own URL back, so cross-contamination is detectable.
        let base = start_server(fake_classifier(
            &dir,
            r#"printf '{"url":"%s","prediction":"legitimate","confidence":0.5}' "$1""#,
        ))
        .await;

        let client = reqwest::Client::new();
        let mut handles = Vec::new();
        for i in 0..10 {
            let client = client.clone();
            let base = base.clone();
            handles.push(tokio::spawn(async move {
                let url = format!("https://site-{}.example.com", i);
                let body: serde_json::Value = client
                    .post(format!("{}/api/predict", base))
                    .json(&serde_json::json!({"url": url}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                assert_eq!(body["url"], url.as_str());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn chat_never_fails() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(&dir, "exit 0")).await;
        let client = reqwest::Client::new();

        for message in ["", "hello", "what is phishing", "asdkjasd"] {
            let response = client
                .post(format!("{}/api/chat", base))
                .json(&serde_json::json!({"message": message}))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 200);

            let body: serde_json::Value = response.json().await.unwrap();
            let reply = body["reply"].as_str().unwrap();
            assert!(!reply.is_empty(), "message: {:?}", message);
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn chat_routes_url_questions_to_detection_page() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(&dir, "exit 0")).await;

        let body: serde_json::Value = reqwest::Client::new()
            .post(format!("{}/api/chat", base))
            .json(&serde_json::json!({"message": "https://example.com"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(body["reply"].as_str().unwrap().contains("Detection Page"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn chat_tolerates_missing_message_field() {
    timeout(TEST_TIMEOUT, async {
        let dir = tempfile::tempdir().unwrap();
        let base = start_server(fake_classifier(&dir, "exit 0")).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/chat", base))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        assert!(!body["reply"].as_str().unwrap().is_empty());
    })
    .await
    .unwrap();
}
