//! Core functionality for the Gemini gateway.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management and secret lookup
//! - Error handling
//! - Metrics collection
//! - HTTP middleware and request-scoped logging

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod secrets;

// Re-export commonly used types
pub use config::{AppConfig, ServerConfig, UpstreamConfig};
pub use error::{AppError, ErrorStyle, Result};
pub use logging::{generate_request_id, get_request_id, request_id_middleware, REQUEST_ID};
pub use metrics::{get_metrics, init_metrics, Metrics};
pub use middleware::MetricsMiddleware;
pub use secrets::{EnvSecrets, SecretSource, StaticSecrets};
