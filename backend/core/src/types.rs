use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Multipart field name carrying uploaded images.
pub const FILES_FIELD: &str = "files";

/// MIME type assumed when an upload does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// An image handed to a [`VisionModel`](crate::VisionModel).
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImagePart {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Content type used for a successful analysis response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Text,
    Xml,
}

impl ResponseFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Xml => "application/xml",
        }
    }
}
