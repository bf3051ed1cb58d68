use thiserror::Error;

use crate::messages;

/// Failure of a single analysis request, as seen by the HTTP caller.
///
/// Each variant maps to exactly one status code; see [`AnalyzeError::status_code`].
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{}", messages::API_KEY_MISSING)]
    MissingApiKey,

    #[error("{}", messages::NO_IMAGES_PROVIDED)]
    NoImages,

    #[error("Image too large. Please use images under {limit}.")]
    ImageTooLarge { limit: String },

    #[error("{0}")]
    MalformedRequest(String),

    #[error("{}", messages::ANALYSIS_TIMEOUT)]
    Timeout,

    #[error("{}", upstream_message(.0))]
    Upstream(String),
}

impl AnalyzeError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoImages | Self::ImageTooLarge { .. } | Self::MalformedRequest(_) => 400,
            Self::MissingApiKey | Self::Timeout | Self::Upstream(_) => 500,
        }
    }

    /// Whether the caller can fix the request without operator help.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }

    /// Build an `ImageTooLarge` for a byte ceiling.
    pub fn too_large(max_bytes: u64) -> Self {
        Self::ImageTooLarge {
            limit: messages::size_limit(max_bytes),
        }
    }
}

fn upstream_message(message: &str) -> &str {
    if message.trim().is_empty() {
        messages::ANALYSIS_FAILED_FALLBACK
    } else {
        message
    }
}
