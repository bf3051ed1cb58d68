//! Config defaults: constants and the pass that writes them into a loaded config.

use crate::schema::AuraConfig;
use aura_core::ResponseFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default request body ceiling. Sized above the upload ceiling so oversized
/// files reach the handler and get a descriptive 400.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SERVER_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_CLIENT_MAX_FILE_SIZE: u64 = 15 * 1024 * 1024;
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: AuraConfig) -> AuraConfig {
    let config = apply_server_defaults(config);
    let config = apply_analysis_defaults(config);
    let config = apply_upload_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: AuraConfig) -> AuraConfig {
    let server = &mut config.server;
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.body_limit_bytes.get_or_insert(DEFAULT_BODY_LIMIT_BYTES);
    config
}

/// The API key is never defaulted; its absence is reported per request.
fn apply_analysis_defaults(mut config: AuraConfig) -> AuraConfig {
    let analysis = &mut config.analysis;
    analysis.model.get_or_insert_with(|| DEFAULT_MODEL.to_string());
    analysis.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    analysis.max_file_size_bytes.get_or_insert(DEFAULT_SERVER_MAX_FILE_SIZE);
    analysis.response_format.get_or_insert(ResponseFormat::Text);
    analysis
        .api_base_url
        .get_or_insert_with(|| DEFAULT_API_BASE_URL.to_string());
    config
}

fn apply_upload_defaults(mut config: AuraConfig) -> AuraConfig {
    let upload = &mut config.upload;
    upload.max_files.get_or_insert(DEFAULT_MAX_FILES);
    upload.max_file_size_bytes.get_or_insert(DEFAULT_CLIENT_MAX_FILE_SIZE);
    upload
        .allowed_types
        .get_or_insert_with(|| DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect());
    upload
        .server_url
        .get_or_insert_with(|| DEFAULT_SERVER_URL.to_string());
    config
}

fn apply_logging_defaults(mut config: AuraConfig) -> AuraConfig {
    config
        .logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
