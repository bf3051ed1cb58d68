//! Client session against a real gateway router backed by a mock model.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use aura_client::{
    validate_selection, AnalysisSession, ClientError, HttpTransport, Notifier, UploadFile,
    UploadLimits,
};
use aura_core::ResponseFormat;
use aura_gateway::{build_router, AnalyzeConfig, GatewayState};
use aura_understanding::MockVision;
use tokio::net::TcpListener;

const PROFILE: &str = "<visualProfile id=\"vp-1\"><summary>warm tones</summary></visualProfile>";

#[derive(Default, Clone)]
struct Notes(Arc<Mutex<Vec<(bool, String, String)>>>);

impl Notes {
    fn all(&self) -> Vec<(bool, String, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for Notes {
    fn success(&self, title: &str, description: &str) {
        self.0.lock().unwrap().push((true, title.into(), description.into()));
    }
    fn error(&self, title: &str, description: &str) {
        self.0.lock().unwrap().push((false, title.into(), description.into()));
    }
}

fn config(api_key: Option<&str>) -> AnalyzeConfig {
    AnalyzeConfig {
        api_key: api_key.map(str::to_string),
        model: "mock".into(),
        timeout: Duration::from_secs(5),
        max_file_size: 10 * 1024 * 1024,
        response_format: ResponseFormat::Text,
    }
}

async fn spawn_gateway(config: AnalyzeConfig, model: Arc<MockVision>) -> String {
    let state = GatewayState::new(config, model);
    let app = build_router(state, 25 * 1024 * 1024);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn photo_is_analyzed_and_profile_shown() {
    let model = Arc::new(MockVision::new("mock").with_response(PROFILE));
    let base = spawn_gateway(config(Some("test-key")), Arc::clone(&model)).await;
    let notes = Notes::default();
    let mut session = AnalysisSession::new(HttpTransport::new(&base), notes.clone());

    let photo = UploadFile::new("photo.jpg", "image/jpeg", vec![7u8; 2 * 1024 * 1024]);
    validate_selection(std::slice::from_ref(&photo), &UploadLimits::default()).unwrap();
    session.handle_files_changed(vec![photo]);

    let text = session.handle_analyze().await.unwrap().to_string();

    assert_eq!(text, PROFILE);
    assert!(session.is_drawer_open());
    assert_eq!(model.calls(), 1);
    let image = model.last_image().unwrap();
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.size(), 2 * 1024 * 1024);
    assert_eq!(
        notes.all(),
        vec![(true, "Analysis Complete".into(), "Your visual profile is ready.".into())]
    );
}

#[tokio::test]
async fn oversized_image_passes_client_check_but_server_rejects_it() {
    let model = Arc::new(MockVision::new("mock").with_response(PROFILE));
    let base = spawn_gateway(config(Some("test-key")), Arc::clone(&model)).await;
    let notes = Notes::default();
    let mut session = AnalysisSession::new(HttpTransport::new(&base), notes.clone());

    // 12 MiB: under the 15 MiB client limit, over the 10 MiB server ceiling.
    let big = UploadFile::new("big.png", "image/png", vec![0u8; 12 * 1024 * 1024]);
    validate_selection(std::slice::from_ref(&big), &UploadLimits::default()).unwrap();
    session.handle_files_changed(vec![big]);

    let err = session.handle_analyze().await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Http {
            status: 400,
            message: "Image too large. Please use images under 10MB.".into(),
        }
    );
    assert_eq!(model.calls(), 0);
    assert!(session.analysis_result().is_none());
    assert_eq!(
        notes.all(),
        vec![(false, "Analysis Failed".into(), "Image too large. Please use images under 10MB.".into())]
    );
}

#[tokio::test]
async fn huge_image_submitted_without_client_checks_is_rejected() {
    let model = Arc::new(MockVision::new("mock").with_response(PROFILE));
    let base = spawn_gateway(config(Some("test-key")), Arc::clone(&model)).await;
    let notes = Notes::default();
    let mut session = AnalysisSession::new(HttpTransport::new(&base), notes.clone());

    let huge = UploadFile::new("huge.png", "image/png", vec![0u8; 20 * 1024 * 1024]);
    assert!(validate_selection(std::slice::from_ref(&huge), &UploadLimits::default()).is_err());
    session.handle_files_changed(vec![huge]);

    let err = session.handle_analyze().await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Http {
            status: 400,
            message: "Image too large. Please use images under 10MB.".into(),
        }
    );
    assert_eq!(model.calls(), 0);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn missing_api_key_is_reported_to_the_user() {
    let model = Arc::new(MockVision::new("mock").with_response(PROFILE));
    let base = spawn_gateway(config(None), Arc::clone(&model)).await;
    let notes = Notes::default();
    let mut session = AnalysisSession::new(HttpTransport::new(&base), notes.clone());
    session.handle_files_changed(vec![UploadFile::new("photo.jpg", "image/jpeg", vec![1u8; 64])]);

    let err = session.handle_analyze().await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Http { status: 500, message: "API key not configured.".into() }
    );
    assert_eq!(model.calls(), 0);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn model_failure_uses_generic_message() {
    let model = Arc::new(MockVision::new("mock").with_failure(""));
    let base = spawn_gateway(config(Some("test-key")), Arc::clone(&model)).await;
    let notes = Notes::default();
    let mut session = AnalysisSession::new(HttpTransport::new(&base), notes.clone());
    session.handle_files_changed(vec![UploadFile::new("photo.webp", "image/webp", vec![1u8; 64])]);

    let err = session.handle_analyze().await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Http { status: 500, message: "Failed to analyze image.".into() }
    );
    assert_eq!(
        notes.all(),
        vec![(false, "Analysis Failed".into(), "Failed to analyze image.".into())]
    );
}
