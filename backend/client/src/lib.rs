//! Client side of Aura: what the user selected, whether it may be sent, and
//! what came back.

pub mod error;
pub mod notify;
pub mod session;
pub mod transport;
pub mod upload;
pub mod validation;

pub use error::ClientError;
pub use notify::Notifier;
pub use session::AnalysisSession;
pub use transport::{AnalysisTransport, HttpTransport, TransportResponse, ANALYZE_PATH};
pub use upload::{detect_mime_type, UploadFile};
pub use validation::{
    format_file_size, is_supported_file_type, validate_file, validate_selection, UploadLimits,
};
