use aura_core::messages;
use thiserror::Error;

/// Why a client-side analysis attempt did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{}", messages::NO_IMAGES)]
    NoImages,

    #[error("Too many files selected (max {max}).")]
    TooManyFiles { max: usize },

    #[error("File \"{name}\" is too large (max {max}).")]
    FileTooLarge { name: String, max: String },

    #[error("File \"{name}\" has an unsupported format.")]
    UnsupportedFormat { name: String },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        let err = ClientError::FileTooLarge { name: "huge.png".into(), max: "15MB".into() };
        assert_eq!(err.to_string(), "File \"huge.png\" is too large (max 15MB).");
        let err = ClientError::UnsupportedFormat { name: "doc.pdf".into() };
        assert_eq!(err.to_string(), "File \"doc.pdf\" has an unsupported format.");
    }

    #[test]
    fn http_error_displays_server_message() {
        let err = ClientError::Http { status: 400, message: "No images provided.".into() };
        assert_eq!(err.to_string(), "No images provided.");
    }
}
