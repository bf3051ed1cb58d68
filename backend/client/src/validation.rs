//! Client-side checks run before a selection is submitted.

use aura_core::messages;

use crate::error::ClientError;
use crate::upload::UploadFile;

const MIB: u64 = 1024 * 1024;

/// Limits a selection must satisfy before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_files: usize,
    pub max_file_size: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_size: 15 * MIB,
            allowed_types: ["image/jpeg", "image/png", "image/webp", "image/gif"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl UploadLimits {
    pub fn allows_type(&self, mime: &str) -> bool {
        self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(mime))
    }
}

/// Whether `mime` is one of the default accepted image types.
pub fn is_supported_file_type(mime: &str) -> bool {
    UploadLimits::default().allows_type(mime)
}

/// Check one file against the size and type limits.
pub fn validate_file(file: &UploadFile, limits: &UploadLimits) -> Result<(), ClientError> {
    if file.size() > limits.max_file_size {
        return Err(ClientError::FileTooLarge {
            name: file.name.clone(),
            max: messages::size_limit(limits.max_file_size),
        });
    }
    if !limits.allows_type(&file.mime_type) {
        return Err(ClientError::UnsupportedFormat {
            name: file.name.clone(),
        });
    }
    Ok(())
}

/// Check a whole selection: file count first, then each file in order.
pub fn validate_selection(files: &[UploadFile], limits: &UploadLimits) -> Result<(), ClientError> {
    if files.len() > limits.max_files {
        return Err(ClientError::TooManyFiles {
            max: limits.max_files,
        });
    }
    files.iter().try_for_each(|f| validate_file(f, limits))
}

/// Human-readable size: "0 Bytes", "512 Bytes", "1.5 KB", "2 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exp = 0;
    while exp + 1 < UNITS.len() && bytes >= 1u64 << (10 * (exp + 1)) {
        exp += 1;
    }
    let value = bytes as f64 / (1u64 << (10 * exp)) as f64;

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exp])
}
