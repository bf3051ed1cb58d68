//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time
//!   (`$${VAR}` escapes to a literal `${VAR}`);
//! - well-known variables that override individual fields after parsing.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::schema::AuraConfig;

/// Credential for the Google Generative AI API.
pub const API_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";
pub const BIND_VAR: &str = "AURA_BIND";
pub const PORT_VAR: &str = "AURA_PORT";
pub const MODEL_VAR: &str = "AURA_MODEL";
pub const TIMEOUT_VAR: &str = "AURA_TIMEOUT_SECS";
pub const LOG_DIR_VAR: &str = "AURA_LOG_DIR";

/// `$${VAR}` (escaped) or `${VAR}`; only uppercase names match.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for a referenced but unset (or empty) env var.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in a config value tree using `env`.
///
/// Only string leaves are processed. Fails on the first missing variable.
pub fn resolve_env_vars(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<String> = None;
    let replaced = ENV_REF_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let whole = &caps[0];
        let name = &caps[1];
        if whole.starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    if let Some(var_name) = missing {
        bail!(MissingEnvVarError {
            var_name,
            config_path: path.to_string(),
        });
    }
    Ok(replaced.into_owned())
}

/// Apply well-known environment overrides on top of the file config.
///
/// Unparseable numeric values are ignored with a warning.
pub fn apply_env_overrides(mut config: AuraConfig, env: &HashMap<String, String>) -> AuraConfig {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(key) = get(API_KEY_VAR) {
        debug!(var = API_KEY_VAR, "API key supplied by environment");
        config.analysis.api_key = Some(key.to_string());
    }
    if let Some(bind) = get(BIND_VAR) {
        config.server.bind = Some(bind.to_string());
    }
    if let Some(port) = get(PORT_VAR) {
        match port.parse() {
            Ok(p) => config.server.port = Some(p),
            Err(_) => warn!(var = PORT_VAR, value = %port, "Ignoring invalid port"),
        }
    }
    if let Some(model) = get(MODEL_VAR) {
        config.analysis.model = Some(model.to_string());
    }
    if let Some(secs) = get(TIMEOUT_VAR) {
        match secs.parse() {
            Ok(s) => config.analysis.timeout_secs = Some(s),
            Err(_) => warn!(var = TIMEOUT_VAR, value = %secs, "Ignoring invalid timeout"),
        }
    }
    if let Some(dir) = get(LOG_DIR_VAR) {
        config.logging.dir = Some(dir.to_string());
    }
    config
}
