//! Upload/analysis orchestration for one client session.

use aura_core::messages;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::notify::Notifier;
use crate::transport::AnalysisTransport;
use crate::upload::UploadFile;

/// Client state for one user session: selection, loading flag, last result,
/// and whether the result panel is open.
///
/// `handle_analyze` takes `&mut self`, so a session never has two analyses
/// in flight. The loading flag is published on a watch channel; UI code holds
/// a receiver from [`AnalysisSession::loading`] to disable its controls while
/// a request runs.
pub struct AnalysisSession<T, N> {
    transport: T,
    notifier: N,
    files: Vec<UploadFile>,
    loading: watch::Sender<bool>,
    analysis_result: Option<String>,
    is_drawer_open: bool,
}

/// Clears the loading flag when dropped, including when the analysis future
/// is dropped mid-request.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn set(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl<T: AnalysisTransport, N: Notifier> AnalysisSession<T, N> {
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            files: Vec::new(),
            loading: watch::Sender::new(false),
            analysis_result: None,
            is_drawer_open: false,
        }
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// A receiver that follows the loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn analysis_result(&self) -> Option<&str> {
        self.analysis_result.as_deref()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.is_drawer_open
    }

    pub fn set_drawer_open(&mut self, open: bool) {
        self.is_drawer_open = open;
    }

    pub fn close_drawer(&mut self) {
        self.set_drawer_open(false);
    }

    /// Replace the selection. No validation happens here.
    pub fn handle_files_changed(&mut self, files: Vec<UploadFile>) {
        self.files = files;
    }

    /// Submit the current selection and record the outcome.
    ///
    /// An empty selection is reported without touching the transport. On
    /// success the result is stored and the drawer opened; every outcome is
    /// also announced through the notifier.
    pub async fn handle_analyze(&mut self) -> Result<&str, ClientError> {
        if self.files.is_empty() {
            self.notifier
                .error(messages::NO_IMAGES, messages::NO_IMAGES_DESCRIPTION);
            return Err(ClientError::NoImages);
        }

        self.analysis_result = None;
        let outcome = {
            let _loading = LoadingGuard::set(&self.loading);
            submit(&self.transport, &self.files).await
        };

        match outcome {
            Ok(text) => {
                info!(chars = text.len(), "Analysis result received");
                self.is_drawer_open = true;
                self.notifier.success(
                    messages::ANALYSIS_COMPLETE,
                    messages::ANALYSIS_COMPLETE_DESCRIPTION,
                );
                Ok(self.analysis_result.insert(text).as_str())
            }
            Err(err) => {
                warn!(error = %err, "Analysis error");
                self.notifier
                    .error(messages::ANALYSIS_FAILED, &err.to_string());
                Err(err)
            }
        }
    }
}

async fn submit<T: AnalysisTransport>(transport: &T, files: &[UploadFile]) -> Result<String, ClientError> {
    let response = transport
        .submit(files)
        .await
        .map_err(|e| ClientError::Transport(format!("{e:#}")))?;

    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ClientError::Http {
            status: response.status,
            message: response.error_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Note {
        Success(String, String),
        Error(String, String),
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier(Arc<Mutex<Vec<Note>>>);

    impl RecordingNotifier {
        fn notes(&self) -> Vec<Note> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, title: &str, description: &str) {
            self.0.lock().unwrap().push(Note::Success(title.into(), description.into()));
        }
        fn error(&self, title: &str, description: &str) {
            self.0.lock().unwrap().push(Note::Error(title.into(), description.into()));
        }
    }

    struct FakeTransport {
        reply: Result<TransportResponse, String>,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(TransportResponse { status, body: body.into() }),
                delay: None,
                calls: Arc::default(),
                seen: Arc::default(),
            }
        }

        fn failing(message: &str) -> Self {
            Self { reply: Err(message.into()), ..Self::replying(200, "") }
        }
    }

    #[async_trait]
    impl AnalysisTransport for FakeTransport {
        async fn submit(&self, files: &[UploadFile]) -> Result<TransportResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = files.iter().map(|f| f.name.clone()).collect();
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone().map_err(|m| anyhow!(m))
        }
    }

    fn photo() -> UploadFile {
        UploadFile::new("photo.jpg", "image/jpeg", vec![0u8; 2 * 1024 * 1024])
    }

    #[tokio::test]
    async fn empty_selection_makes_no_request() {
        let transport = FakeTransport::replying(200, "unused");
        let calls = Arc::clone(&transport.calls);
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(transport, notifier.clone());

        let err = session.handle_analyze().await.unwrap_err();

        assert_eq!(err, ClientError::NoImages);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            notifier.notes(),
            vec![Note::Error("No images selected".into(), "Please upload at least one image.".into())]
        );
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn success_stores_result_and_opens_drawer() {
        let xml = "<visualProfile id=\"p\"/>";
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(FakeTransport::replying(200, xml), notifier.clone());
        session.handle_files_changed(vec![photo()]);

        assert_eq!(session.handle_analyze().await.unwrap(), xml);

        assert_eq!(session.analysis_result(), Some(xml));
        assert!(session.is_drawer_open());
        assert!(!session.is_loading());
        assert_eq!(
            notifier.notes(),
            vec![Note::Success("Analysis Complete".into(), "Your visual profile is ready.".into())]
        );
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let body = r#"{"error":"Image too large. Please use images under 10MB."}"#;
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(FakeTransport::replying(400, body), notifier.clone());
        session.handle_files_changed(vec![UploadFile::new("huge.png", "image/png", vec![0u8; 16])]);

        let err = session.handle_analyze().await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Http { status: 400, message: "Image too large. Please use images under 10MB.".into() }
        );
        assert_eq!(
            notifier.notes(),
            vec![Note::Error("Analysis Failed".into(), "Image too large. Please use images under 10MB.".into())]
        );
        assert!(session.analysis_result().is_none());
        assert!(!session.is_drawer_open());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn unparseable_error_body_uses_status_message() {
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(FakeTransport::replying(503, "Service Unavailable"), notifier.clone());
        session.handle_files_changed(vec![photo()]);

        session.handle_analyze().await.unwrap_err();

        assert_eq!(
            notifier.notes(),
            vec![Note::Error("Analysis Failed".into(), "HTTP error! Status: 503".into())]
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(FakeTransport::failing("connection refused"), notifier.clone());
        session.handle_files_changed(vec![photo()]);

        let err = session.handle_analyze().await.unwrap_err();

        assert_eq!(err, ClientError::Transport("connection refused".into()));
        assert!(matches!(&notifier.notes()[0], Note::Error(t, d) if t == "Analysis Failed" && d == "connection refused"));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_result() {
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(FakeTransport::replying(200, "<first/>"), notifier.clone());
        session.handle_files_changed(vec![photo()]);
        session.handle_analyze().await.unwrap();

        session.transport.reply = Ok(TransportResponse { status: 500, body: "{\"error\":\"boom\"}".into() });
        session.handle_analyze().await.unwrap_err();

        assert!(session.analysis_result().is_none());
    }

    #[tokio::test]
    async fn selection_is_sent_in_order_and_replaced_wholesale() {
        let transport = FakeTransport::replying(200, "<ok/>");
        let seen = Arc::clone(&transport.seen);
        let mut session = AnalysisSession::new(transport, RecordingNotifier::default());

        session.handle_files_changed(vec![
            UploadFile::new("one.png", "image/png", vec![1u8]),
            UploadFile::new("two.png", "image/png", vec![2u8]),
        ]);
        session.handle_files_changed(vec![
            UploadFile::new("three.png", "image/png", vec![3u8]),
            UploadFile::new("four.png", "image/png", vec![4u8]),
        ]);
        session.handle_analyze().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["three.png".to_string(), "four.png".to_string()]);
    }

    #[tokio::test]
    async fn loading_flag_cleared_when_analysis_is_abandoned() {
        let transport = FakeTransport {
            delay: Some(Duration::from_secs(10)),
            ..FakeTransport::replying(200, "<late/>")
        };
        let notifier = RecordingNotifier::default();
        let mut session = AnalysisSession::new(transport, notifier.clone());
        session.handle_files_changed(vec![photo()]);
        let loading = session.loading();

        let abandoned = tokio::time::timeout(Duration::from_millis(50), session.handle_analyze()).await;

        assert!(abandoned.is_err());
        assert!(!session.is_loading());
        assert!(!*loading.borrow());
        assert!(notifier.notes().is_empty());
    }

    #[tokio::test]
    async fn loading_is_observable_while_request_runs() {
        let transport = FakeTransport {
            delay: Some(Duration::from_millis(100)),
            ..FakeTransport::replying(200, "<ok/>")
        };
        let mut session = AnalysisSession::new(transport, RecordingNotifier::default());
        session.handle_files_changed(vec![photo()]);
        let mut loading = session.loading();
        assert!(!*loading.borrow());

        let watcher = tokio::spawn(async move {
            let during = *loading.wait_for(|on| *on).await.unwrap();
            let after = *loading.wait_for(|on| !*on).await.unwrap();
            (during, after)
        });

        session.handle_analyze().await.unwrap();

        let observed = tokio::time::timeout(Duration::from_secs(1), watcher).await.unwrap().unwrap();
        assert_eq!(observed, (true, false));
        assert!(!session.is_loading());
    }

    #[test]
    fn drawer_can_be_closed() {
        let mut session = AnalysisSession::new(FakeTransport::replying(200, ""), RecordingNotifier::default());
        session.set_drawer_open(true);
        session.close_drawer();
        assert!(!session.is_drawer_open());
    }
}
