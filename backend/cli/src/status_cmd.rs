//! `aura status`: report a running server's health.

use anyhow::Result;
use serde_json::Value;

use crate::terminal_output::{note_success, note_warn, render_table, Column};

pub fn health_url(server: &str) -> String {
    format!("{}/api/health", server.trim_end_matches('/'))
}

/// Flatten the health report into `field | value` rows.
fn report_rows(report: &Value) -> Vec<Vec<String>> {
    match report.as_object() {
        Some(map) => map
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                vec![k.clone(), value]
            })
            .collect(),
        None => Vec::new(),
    }
}

pub async fn run(server: &str) -> Result<()> {
    let url = health_url(server);
    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body: Value = resp.json().await?;
            note_success(&format!("Aura is running at {server}"));
            print!("{}", render_table(&[Column::left("Field"), Column::left("Value")], &report_rows(&body)));
            if body.get("apiKeyConfigured") == Some(&Value::Bool(false)) {
                note_warn("No API key configured; analysis requests will fail");
            }
        }
        Ok(resp) => note_warn(&format!("{url} answered {}", resp.status())),
        Err(_) => note_warn(&format!("Aura is not running at {server}")),
    }
    Ok(())
}
