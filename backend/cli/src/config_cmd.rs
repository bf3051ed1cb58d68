//! `aura config`: print the effective configuration, secrets redacted.

use std::path::Path;

use anyhow::Result;
use aura_config::{redacted_config, AuraConfig};

use crate::terminal_output::note_info;

pub fn run(config: &AuraConfig, path: &Path) -> Result<()> {
    if path.exists() {
        note_info(&format!("Loaded {}", path.display()));
    } else {
        note_info(&format!("{} not found; showing defaults and environment", path.display()));
    }
    println!("{}", serde_json::to_string_pretty(&redacted_config(config))?);
    Ok(())
}
