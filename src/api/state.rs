//! Shared application state.

use crate::core::config::AppConfig;
use crate::core::secrets::SecretSource;
use crate::core::Result;
use crate::services::{Forwarder, GeminiClient};
use std::sync::Arc;

/// State handed to every handler. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: &AppConfig, client: GeminiClient, secrets: Arc<dyn SecretSource>) -> Self {
        let forwarder = Forwarder::new(client, secrets, config.upstream.api_key_var.clone());
        Self { forwarder }
    }

    /// Build state with an HTTP client derived from `config`.
    pub fn from_config(config: &AppConfig, secrets: Arc<dyn SecretSource>) -> Result<Self> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(config, client, secrets))
    }
}
