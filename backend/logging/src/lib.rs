//! Structured logging for Aura.
//!
//! Console + rolling NDJSON file output, secret scrubbing, and per-request
//! analysis events.

pub mod analysis_events;
pub mod logger;
pub mod redact;

pub use analysis_events::{log_analysis_event, AnalysisEvent, AnalysisEventEntry};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
