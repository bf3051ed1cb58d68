//! Sending a selection to the analysis endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use aura_core::{messages, FILES_FIELD};

use crate::upload::UploadFile;

/// Path of the analysis endpoint relative to the server base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";


/// Status and body of an analysis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a JSON error body, or a generic HTTP-status message.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| messages::http_error(self.status))
    }
}

/// Delivers a selection to the analysis endpoint.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submit all files as one multipart request. Non-success statuses are
    /// returned, not raised.
    async fn submit(&self, files: &[UploadFile]) -> Result<TransportResponse>;
}

/// `reqwest`-backed transport posting to `<base_url>/api/analyze`.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// One `files` part per file, in selection order.
fn build_form(files: &[UploadFile]) -> Result<Form> {
    files.iter().try_fold(Form::new(), |form, file| {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .with_context(|| format!("Invalid MIME type for {}: {}", file.name, file.mime_type))?;
        Ok(form.part(FILES_FIELD, part))
    })
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn submit(&self, files: &[UploadFile]) -> Result<TransportResponse> {
        debug!(endpoint = %self.endpoint, files = files.len(), "Submitting selection");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(build_form(files)?)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read analysis response body")?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Echo `name|file_name|content_type|len` for each part, one per line.
    async fn echo_parts(mut multipart: Multipart) -> String {
        let mut lines = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let mime = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.unwrap().len();
            lines.push(format!("{name}|{file_name}|{mime}|{len}"));
        }
        lines.join("\n")
    }

    #[tokio::test]
    async fn one_files_part_per_file_in_order() {
        let base = serve(Router::new().route(ANALYZE_PATH, post(echo_parts))).await;
        let transport = HttpTransport::new(&format!("{base}/"));
        assert_eq!(transport.endpoint(), format!("{base}/api/analyze"));

        let files = vec![
            UploadFile::new("b.png", "image/png", vec![0u8; 3]),
            UploadFile::new("a.jpg", "image/jpeg", vec![0u8; 5]),
            UploadFile::new("c.gif", "image/gif", vec![0u8; 1]),
        ];
        let resp = transport.submit(&files).await.unwrap();

        assert!(resp.is_success());
        assert_eq!(
            resp.body,
            "files|b.png|image/png|3\nfiles|a.jpg|image/jpeg|5\nfiles|c.gif|image/gif|1"
        );
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let router = Router::new().route(
            ANALYZE_PATH,
            post(|| async {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": "No images provided." })))
            }),
        );
        let base = serve(router).await;
        let resp = HttpTransport::new(&base)
            .submit(&[UploadFile::new("a.png", "image/png", vec![1u8])])
            .await
            .unwrap();
        assert_eq!(resp.status, 400);
        assert_eq!(resp.error_message(), "No images provided.");
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = HttpTransport::new(&format!("http://{addr}"))
            .submit(&[UploadFile::new("a.png", "image/png", vec![1u8])])
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let not_json = TransportResponse { status: 502, body: "<html>Bad Gateway</html>".into() };
        assert_eq!(not_json.error_message(), "HTTP error! Status: 502");

        let no_field = TransportResponse { status: 500, body: "{\"detail\":\"x\"}".into() };
        assert_eq!(no_field.error_message(), "HTTP error! Status: 500");

        let empty = TransportResponse { status: 500, body: "{\"error\":\"\"}".into() };
        assert_eq!(empty.error_message(), "HTTP error! Status: 500");
    }

    #[test]
    fn invalid_mime_type_is_rejected() {
        assert!(build_form(&[UploadFile::new("x", "not a mime", vec![0u8])]).is_err());
    }
}
