//! Analysis request events
//!
//! One structured entry per stage of an analysis request, emitted through
//! `tracing` under the `analysis_events` target so the NDJSON file layer
//! records them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Received {
        file_name: Option<String>,
        mime_type: String,
        size_bytes: usize,
    },
    Completed {
        model: String,
        latency_ms: u64,
        output_chars: usize,
    },
    Failed {
        status: u16,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct AnalysisEventEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

/// Log an analysis event. Error messages are scrubbed first.
pub fn log_analysis_event(request_id: &str, mut event: AnalysisEvent) -> AnalysisEventEntry {
    if let AnalysisEvent::Failed { error_msg, .. } = &mut event {
        *error_msg = redact_sensitive_data(error_msg);
    }

    let entry = AnalysisEventEntry {
        request_id: request_id.into(),
        timestamp: Utc::now(),
        event,
    };

    info!(target: "analysis_events", event = ?entry, "Analysis event");
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_events_are_redacted() {
        let entry = log_analysis_event(
            "req-1",
            AnalysisEvent::Failed {
                status: 500,
                error_msg: "GET https://x.test/?key=abc123 failed".into(),
            },
        );
        match entry.event {
            AnalysisEvent::Failed { error_msg, .. } => assert!(!error_msg.contains("abc123")),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(entry.request_id, "req-1");
    }
}
