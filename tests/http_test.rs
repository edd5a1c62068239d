//! Runs the real reqwest client and file sink against a local stub of
//! `POST /api/generate-video`.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

use reelgen::client::{ClientError, HttpVideoApi};
use reelgen::config::{ByteSize, ClientConfig};
use reelgen::download::FileDownloads;
use reelgen::handler::{SubmitError, SubmitOutcome, messages};
use reelgen::page::{Page, PageOptions};

const VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom";

type Received = Arc<Mutex<Vec<Value>>>;

/// Stub of the generator: dialogue lines get a video, anything else a 400
async fn generate(State(received): State<Received>, Json(payload): Json<Value>) -> Response {
    received.lock().unwrap().push(payload.clone());

    let script = payload["script"].as_str().unwrap_or_default();
    if script.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Script is empty." }))).into_response();
    }
    if !script.lines().any(|l| l.trim_start().starts_with('[')) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "No valid dialogue lines found in script." })),
        )
            .into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "video/mp4"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ai_generated_video.mp4\"",
            ),
        ],
        VIDEO,
    )
        .into_response()
}

async fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body><h1>502 Bad Gateway</h1></body></html>",
    )
        .into_response()
}

async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn generator_stub() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/generate-video", post(generate))
        .with_state(received.clone());
    (spawn_stub(app).await, received)
}

fn mount(config: ClientConfig, output: &TempDir) -> Page {
    let api = HttpVideoApi::new(&config).unwrap();
    let downloads = FileDownloads::new(output.path());
    Page::mount(Arc::new(api), Arc::new(downloads), PageOptions::default())
}

fn client_config(base_url: String) -> ClientConfig {
    ClientConfig {
        base_url,
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_video_is_saved_to_disk() {
    let (base_url, received) = generator_stub().await;
    let output = TempDir::new().unwrap();
    let mut page = mount(client_config(base_url), &output);
    page.script.set_value("[peter]: hey brian\n[brian]: hey peter");

    let (event, outcome) = page.submit().await;

    assert!(event.default_prevented());
    let expected_path = output.path().join("ai_generated_video.mp4");
    match outcome {
        Some(SubmitOutcome::Downloaded { path, bytes }) => {
            assert_eq!(path, expected_path);
            assert_eq!(bytes, VIDEO.len() as u64);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(std::fs::read(&expected_path).unwrap(), VIDEO);

    assert_eq!(
        *received.lock().unwrap(),
        vec![json!({ "script": "[peter]: hey brian\n[brian]: hey peter" })]
    );
    assert_eq!(page.status.text(), messages::DOWNLOAD_STARTED);
    assert!(!page.button.is_disabled());
    assert_eq!(page.button.label(), messages::IDLE_LABEL);
}

#[tokio::test]
async fn test_server_rejection_shows_detail() {
    let (base_url, _received) = generator_stub().await;
    let output = TempDir::new().unwrap();
    let mut page = mount(client_config(base_url), &output);
    page.script.set_value("no dialogue here");

    let (_, outcome) = page.submit().await;

    assert!(matches!(outcome, Some(SubmitOutcome::ServerError { status: 400, .. })));
    assert_eq!(page.status.text(), "Error: No valid dialogue lines found in script.");
    assert!(!output.path().join("ai_generated_video.mp4").exists());
    assert!(!page.button.is_disabled());
}

#[tokio::test]
async fn test_html_error_page_is_unexpected() {
    let app = Router::new().route("/api/generate-video", post(bad_gateway));
    let base_url = spawn_stub(app).await;
    let output = TempDir::new().unwrap();
    let mut page = mount(client_config(base_url), &output);
    page.script.set_value("[peter]: hi");

    let (_, outcome) = page.submit().await;

    assert!(matches!(
        outcome,
        Some(SubmitOutcome::Failed(SubmitError::Client(ClientError::Decode(_))))
    ));
    assert_eq!(page.status.text(), messages::UNEXPECTED_ERROR);
    assert!(!page.button.is_disabled());
}

#[tokio::test]
async fn test_connection_refused_is_unexpected() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let output = TempDir::new().unwrap();
    let mut page = mount(client_config(format!("http://{addr}")), &output);
    page.script.set_value("[peter]: hi");

    let (_, outcome) = page.submit().await;

    assert!(matches!(outcome, Some(SubmitOutcome::Failed(SubmitError::Client(_)))));
    assert_eq!(
        page.status.history(),
        vec![messages::SENDING, messages::UNEXPECTED_ERROR]
    );
    assert_eq!(page.button.label(), messages::IDLE_LABEL);
    assert!(!page.button.is_disabled());
}

#[tokio::test]
async fn test_oversized_video_is_refused() {
    let (base_url, _received) = generator_stub().await;
    let output = TempDir::new().unwrap();
    let config = ClientConfig {
        max_video_bytes: ByteSize(8),
        ..client_config(base_url)
    };
    let mut page = mount(config, &output);
    page.script.set_value("[brian]: this one is too long");

    let (_, outcome) = page.submit().await;

    assert!(matches!(
        outcome,
        Some(SubmitOutcome::Failed(SubmitError::Client(ClientError::BodyTooLarge { limit: 8, .. })))
    ));
    assert_eq!(page.status.text(), messages::UNEXPECTED_ERROR);
    assert!(!output.path().join("ai_generated_video.mp4").exists());
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let (base_url, received) = generator_stub().await;
    let output = TempDir::new().unwrap();
    let mut page = mount(client_config(format!("{base_url}/")), &output);
    page.script.set_value("[peter]: hi");

    let (_, outcome) = page.submit().await;

    assert!(outcome.is_some_and(|o| o.is_downloaded()));
    assert_eq!(received.lock().unwrap().len(), 1);
}
