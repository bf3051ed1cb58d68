//! `aura-config` — runtime configuration for the Aura analyzer.
//!
//! Provides:
//! - Typed config schema (server, analysis, upload, logging)
//! - YAML loading from `~/.aura/config.yaml`
//! - `${ENV_VAR}` substitution and well-known env overrides
//! - Default value application
//! - Validation and redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, process_env, resolve_env_vars, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use redact::{redact, redacted_config};
pub use schema::{AnalysisConfig, AuraConfig, LoggingConfig, ServerConfig, UploadConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// findings are logged; errors fail the load.
pub async fn load_and_prepare(path: &Path) -> Result<AuraConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config, &process_env())
}

/// The pure part of [`load_and_prepare`], with an explicit environment.
pub fn prepare(raw_config: AuraConfig, env: &HashMap<String, String>) -> Result<AuraConfig> {
    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value, env).context("Failed to resolve env vars in config")?;
    let config: AuraConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        return Err(first.into());
    }

    Ok(config)
}
