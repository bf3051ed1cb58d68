//! Config validation with user-friendly error messages.

use crate::schema::AuraConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &AuraConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_analysis(config, &mut report);
    validate_upload(config, &mut report);
    report
}

fn validate_server(config: &AuraConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.bind().trim().is_empty() {
        report.error("server.bind", "Bind address cannot be empty");
    }
    if server.body_limit_bytes() as u64 <= config.analysis.max_file_size_bytes() {
        report.warn(
            "server.bodyLimitBytes",
            "Body limit does not exceed analysis.maxFileSizeBytes; files near the ceiling will be cut off while streaming",
        );
    }
}

fn validate_analysis(config: &AuraConfig, report: &mut ValidationReport) {
    let analysis = &config.analysis;
    if analysis.api_key().is_none() {
        report.warn(
            "analysis.apiKey",
            "No API key configured; every analysis request will fail with 500",
        );
    }
    if analysis.model().trim().is_empty() {
        report.error("analysis.model", "Model name cannot be empty");
    }
    if analysis.timeout_secs == Some(0) {
        report.error("analysis.timeoutSecs", "Timeout must be at least 1 second");
    }
    if analysis.max_file_size_bytes == Some(0) {
        report.error("analysis.maxFileSizeBytes", "File size ceiling must be positive");
    }
    let base = analysis.api_base_url();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        report.error("analysis.apiBaseUrl", format!("Not an http(s) URL: {base}"));
    }
}

fn validate_upload(config: &AuraConfig, report: &mut ValidationReport) {
    let upload = &config.upload;
    if upload.max_files == Some(0) {
        report.error("upload.maxFiles", "At least one file must be allowed");
    }
    if upload.max_file_size_bytes == Some(0) {
        report.error("upload.maxFileSizeBytes", "File size ceiling must be positive");
    }
    for (i, mime) in upload.allowed_types().iter().enumerate() {
        if !mime.starts_with("image/") {
            report.warn(
                format!("upload.allowedTypes[{i}]"),
                format!("'{mime}' is not an image type; the model may reject it"),
            );
        }
    }
}
