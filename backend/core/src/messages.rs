//! User-visible message strings shared by the gateway, the client and the CLI.

pub const API_KEY_MISSING: &str = "API key not configured.";
pub const NO_IMAGES_PROVIDED: &str = "No images provided.";
pub const ANALYSIS_TIMEOUT: &str = "Analysis timeout";
pub const ANALYSIS_FAILED_FALLBACK: &str = "Failed to analyze image.";

pub const NO_IMAGES: &str = "No images selected";
pub const NO_IMAGES_DESCRIPTION: &str = "Please upload at least one image.";
pub const ANALYSIS_FAILED: &str = "Analysis Failed";

pub const ANALYSIS_COMPLETE: &str = "Analysis Complete";
pub const ANALYSIS_COMPLETE_DESCRIPTION: &str = "Your visual profile is ready.";

/// Size ceiling in whole units, rounded down: "10MB", "512KB", "100B".
pub fn size_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    if bytes >= MIB {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes}B")
    }
}

/// Fallback when a failed response carries no usable error body.
pub fn http_error(status: u16) -> String {
    format!("HTTP error! Status: {status}")
}
