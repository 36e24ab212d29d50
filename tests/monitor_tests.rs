use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airline_chatbot::config::{AppConfig, EmbedderKind, FallbackOrder};
use airline_chatbot::monitor::{Monitor, MonitorConfig};
use airline_chatbot::state::AppState;

// ── Helpers ──

fn monitor(dir: &Path, backend_url: &str, ui_url: &str) -> Monitor {
    Monitor::new(MonitorConfig {
        backend_url: backend_url.to_string(),
        ui_url: ui_url.to_string(),
        log_file: dir.join("monitoring.log"),
        store_dir: dir.join("vector_store"),
        ..MonitorConfig::default()
    })
}

fn read_log(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("monitoring.log")).unwrap_or_default()
}

/// Serves the real backend on an ephemeral port.
async fn spawn_backend(dir: &Path) -> String {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let state = AppState::build(AppConfig {
        port: 0,
        responses_path: data.join("responses.json"),
        intents_path: data.join("sample_intents.json"),
        vector_store_dir: dir.join("vector_store"),
        rng_seed: Some(7),
        fallback_order: FallbackOrder::DatasetFirst,
        embedder: EmbedderKind::Hashing,
    })
    .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = airline_chatbot::app(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ── Failure Paths ──

#[tokio::test]
async fn test_unreachable_backend_logs_error() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = monitor(dir.path(), "http://127.0.0.1:9", "http://127.0.0.1:9");

    assert!(!monitor.check_backend_health().await);

    let log = read_log(dir.path());
    assert!(log.contains("[ERROR]"), "{log}");
    let line = log
        .lines()
        .find(|l| l.contains("Backend health check: FAILED ("))
        .unwrap_or_else(|| panic!("no failure entry in {log}"));
    let reason = line
        .split_once("FAILED (")
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .unwrap();
    assert!(!reason.trim().is_empty(), "{line}");
    assert!(reason.contains("error sending request"), "{line}");
}

#[tokio::test]
async fn test_backend_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = monitor(dir.path(), &server.uri(), &server.uri());

    assert!(!monitor.check_backend_health().await);
    assert!(read_log(dir.path()).contains("Backend health check: FAILED (Status: 503)"));
}

#[tokio::test]
async fn test_empty_chat_responses_fail_functionality() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = monitor(dir.path(), &server.uri(), &server.uri());

    assert!(!monitor.test_chatbot_functionality().await);

    let log = read_log(dir.path());
    assert!(log.contains("Chat test 'Hello': FAILED (No response)"));
    assert!(log.contains("Chatbot functionality: 0.0% success rate"));
}

#[tokio::test]
async fn test_full_check_against_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = monitor(dir.path(), "http://127.0.0.1:9", "http://127.0.0.1:9");

    let report = monitor.run_full_check().await;
    assert_eq!(report.total(), 6);
    assert!(!report.all_passed());

    let log = read_log(dir.path());
    assert!(log.contains("Starting full health check..."));
    assert!(log.contains(&report.summary()));
    assert!(log.contains("[WARNING] Some systems have issues"));
}

// ── Healthy Paths ──

#[tokio::test]
async fn test_mocked_services_pass() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "Happy to help!" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ui_url = format!("{}/", server.uri());
    let monitor = monitor(dir.path(), &server.uri(), &ui_url);

    assert!(monitor.check_ui_health().await);
    assert!(monitor.test_chatbot_functionality().await);
    assert!(monitor.measure_response_time().await);

    let log = read_log(dir.path());
    assert!(log.contains("UI health check: PASSED"));
    assert!(log.contains("Chatbot functionality: 100.0% success rate"));
    assert!(log.contains("Response time: "));
}

#[tokio::test]
async fn test_live_backend_passes_checks() {
    let dir = tempfile::tempdir().unwrap();
    let backend = spawn_backend(dir.path()).await;
    let monitor = monitor(dir.path(), &backend, &backend);

    assert!(monitor.check_backend_health().await);
    assert!(monitor.test_chatbot_functionality().await);
    assert!(monitor.measure_response_time().await);
    assert!(monitor.check_vector_store());

    let log = read_log(dir.path());
    assert!(log.contains("[INFO] Backend health check: PASSED"));
    assert!(!log.contains("[ERROR]"), "{log}");
}
