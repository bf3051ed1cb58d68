//! Aura Gateway HTTP API Server
//!
//! Hosts the image analysis endpoint and a health check.

pub mod analyze;
pub mod cors;
pub mod health_api;
pub mod server;

pub use analyze::{AnalyzeConfig, ApiError};
pub use server::{build_router, start_server, GatewayState};
