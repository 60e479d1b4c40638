//! Gemini Gateway - a credential-injecting proxy for the Gemini API
//!
//! Browser clients call this server instead of Google directly, so the API key
//! never appears in client-side code. Two gateways are exposed:
//!
//! - **Generic Gateway** (`/api/gemini`): forwards any JSON body to
//!   `generateContent` and relays the upstream answer, errors included.
//! - **Structured Analysis Gateway** (`/api/analyze`): turns `{lang, coins}`
//!   into a search-grounded prompt with a fixed JSON response schema.
//!
//! # Architecture
//!
//! - [`core`]: configuration, secrets, errors, metrics, middleware, logging
//! - [`api`]: HTTP handlers and the router
//! - [`services`]: prompt/payload construction and upstream forwarding
//!
//! # Configuration
//!
//! The API key is read per request from the secret named by
//! `upstream.api_key_var` (default `GEMINI_API_KEY`).
//!
//! Optional environment variables:
//! - `CONFIG_PATH`: YAML configuration file
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 18000)
//! - `GEMINI_API_BASE`: API root (default: https://generativelanguage.googleapis.com/v1beta)
//! - `GEMINI_MODEL`: Model name (default: gemini-2.5-flash)
//! - `VERIFY_SSL`: Verify SSL certificates for upstream (default: true)
//! - `REQUEST_TIMEOUT_SECS`: Upstream request timeout in seconds (default: unset)

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use api::{router, AppState};
pub use crate::core::{AppConfig, AppError, EnvSecrets, ErrorStyle, Result, SecretSource, StaticSecrets};
pub use services::{Forwarder, GeminiClient, Language};
