//! `aura analyze`: validate a selection, submit it, print the profile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aura_client::{
    format_file_size, validate_selection, AnalysisSession, HttpTransport, UploadFile, UploadLimits,
};
use aura_config::AuraConfig;

use crate::terminal_output::{note_error, note_info, render_table, Column, TerminalNotifier};

pub fn upload_limits(config: &AuraConfig) -> UploadLimits {
    UploadLimits {
        max_files: config.upload.max_files(),
        max_file_size: config.upload.max_file_size_bytes(),
        allowed_types: config.upload.allowed_types(),
    }
}

fn selection_table(files: &[UploadFile]) -> String {
    let columns = [Column::left("File"), Column::left("Type"), Column::right("Size")];
    let rows: Vec<Vec<String>> = files
        .iter()
        .map(|f| vec![f.name.clone(), f.mime_type.clone(), format_file_size(f.size())])
        .collect();
    render_table(&columns, &rows)
}

async fn load_selection(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(UploadFile::from_path(path).await?);
    }
    Ok(files)
}

/// Returns whether a profile was produced. Client-side failures are shown as
/// notes and yield `false`; only I/O problems come back as errors.
pub async fn run(config: &AuraConfig, paths: &[PathBuf], server: &str, output: Option<&Path>) -> Result<bool> {
    let files = load_selection(paths).await?;
    eprint!("{}", selection_table(&files));

    if let Err(err) = validate_selection(&files, &upload_limits(config)) {
        note_error(&err.to_string());
        return Ok(false);
    }

    let transport = HttpTransport::new(server);
    note_info(&format!("Analyzing {} file(s) via {}", files.len(), transport.endpoint()));

    let mut session = AnalysisSession::new(transport, TerminalNotifier);
    session.handle_files_changed(files);
    // The notifier has already shown the failure.
    let Ok(profile) = session.handle_analyze().await else {
        return Ok(false);
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, profile)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            note_info(&format!("Profile written to {}", path.display()));
        }
        None => println!("{profile}"),
    }

    Ok(true)
}
