pub mod error;
pub mod messages;
pub mod traits;
pub mod types;

pub use error::AnalyzeError;
pub use traits::VisionModel;
pub use types::{ImagePart, ResponseFormat, DEFAULT_MIME_TYPE, FILES_FIELD};
