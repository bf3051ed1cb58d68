//! Image analysis endpoint (`POST /api/analyze`).
//!
//! Takes the first `files` entry of a multipart upload, forwards it with the
//! visual-profile prompt to the configured vision model, and returns the
//! model's text unmodified.

use std::time::{Duration, Instant};

use aura_config::AuraConfig;
use aura_core::{AnalyzeError, ImagePart, ResponseFormat, DEFAULT_MIME_TYPE, FILES_FIELD};
use aura_logging::{log_analysis_event, redact_sensitive_data, AnalysisEvent};
use aura_understanding::VISUAL_PROFILE_PROMPT;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::BytesMut;
use serde_json::json;
use tracing::{error, info, warn};

use crate::cors::cors_headers;
use crate::server::GatewayState;

/// Handler configuration, fixed at start-up.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub max_file_size: u64,
    pub response_format: ResponseFormat,
}

impl AnalyzeConfig {
    pub fn from_config(config: &AuraConfig) -> Self {
        let analysis = &config.analysis;
        Self {
            api_key: analysis.api_key().map(str::to_string),
            model: analysis.model().to_string(),
            timeout: analysis.timeout(),
            max_file_size: analysis.max_file_size_bytes(),
            response_format: analysis.response_format(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// [`AnalyzeError`] rendered as `{"error": "..."}` with its status code.
#[derive(Debug)]
pub struct ApiError(pub AnalyzeError);

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// An uploaded file as received from the multipart body.
struct Upload {
    file_name: Option<String>,
    image: ImagePart,
}

/// Handler for `POST /api/analyze`.
pub async fn analyze(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let start = Instant::now();

    match run_analysis(&state, &request_id, multipart).await {
        Ok(text) => {
            log_analysis_event(
                &request_id,
                AnalysisEvent::Completed {
                    model: state.model.name().to_string(),
                    latency_ms: start.elapsed().as_millis() as u64,
                    output_chars: text.chars().count(),
                },
            );
            let content_type = state.config.response_format.content_type();
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                cors_headers(),
                text,
            )
                .into_response())
        }
        Err(err) => {
            let status = err.status_code();
            if err.is_client_error() {
                warn!(request_id = %request_id, status, error = %err, "Rejected analysis request");
            } else {
                error!(request_id = %request_id, status, error = %err, "Analysis failed");
            }
            log_analysis_event(
                &request_id,
                AnalysisEvent::Failed {
                    status,
                    error_msg: err.to_string(),
                },
            );
            Err(err.into())
        }
    }
}

async fn run_analysis(
    state: &GatewayState,
    request_id: &str,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, AnalyzeError> {
    let config = &state.config;
    if !config.has_api_key() {
        return Err(AnalyzeError::MissingApiKey);
    }

    let mut multipart = multipart.map_err(|r| AnalyzeError::MalformedRequest(r.body_text()))?;
    let upload = first_file(&mut multipart, config.max_file_size)
        .await?
        .ok_or(AnalyzeError::NoImages)?;

    log_analysis_event(
        request_id,
        AnalysisEvent::Received {
            file_name: upload.file_name.clone(),
            mime_type: upload.image.mime_type.clone(),
            size_bytes: upload.image.size(),
        },
    );
    info!(
        request_id = %request_id,
        model = %state.model.name(),
        bytes = upload.image.size(),
        "Forwarding image to vision model"
    );

    let call = state.model.generate(VISUAL_PROFILE_PROMPT, &upload.image);
    match tokio::time::timeout(config.timeout, call).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AnalyzeError::Upstream(redact_sensitive_data(&format!("{e:#}")))),
        Err(_) => Err(AnalyzeError::Timeout),
    }
}

/// Read the first `files` field, enforcing the size ceiling while streaming.
///
/// Returns `Ok(None)` when the form has no `files` entry.
async fn first_file(multipart: &mut Multipart, max_size: u64) -> Result<Option<Upload>, AnalyzeError> {
    while let Some(mut field) = multipart.next_field().await.map_err(|e| multipart_error(e, max_size))? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let mime_type = field
            .content_type()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, max_size))? {
            if (data.len() + chunk.len()) as u64 > max_size {
                while let Ok(Some(_)) = field.chunk().await {}
                drop(field);
                discard_rest(multipart).await;
                return Err(AnalyzeError::too_large(max_size));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(Some(Upload {
            file_name,
            image: ImagePart::new(mime_type, data.freeze()),
        }));
    }
    Ok(None)
}

/// Consume what is left of the body. Answering with the body half read makes
/// the connection close under a client that is still sending.
async fn discard_rest(multipart: &mut Multipart) {
    while let Ok(Some(mut field)) = multipart.next_field().await {
        while let Ok(Some(_)) = field.chunk().await {}
    }
}

/// A body cut off by the transport limit is reported like any oversized file.
fn multipart_error(err: MultipartError, max_size: u64) -> AnalyzeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalyzeError::too_large(max_size)
    } else {
        AnalyzeError::MalformedRequest(err.body_text())
    }
}
