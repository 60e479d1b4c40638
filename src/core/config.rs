//! Configuration management for the Gemini gateway.
//!
//! Configuration comes from built-in defaults, an optional YAML file (with
//! environment variable expansion) and environment variable overrides, in
//! that order of precedence (later wins).

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the generative-content API the gateways forward to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Versioned API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model addressed by `generateContent`
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the secret holding the API key. Only the name lives in
    /// configuration; the value is looked up per request.
    #[serde(default = "default_api_key_var")]
    pub api_key_var: String,

    /// Whether to verify SSL certificates for upstream requests
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Optional upstream request timeout. Unset means the client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_var: default_api_key_var(),
            verify_ssl: default_verify_ssl(),
            request_timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18000
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_var() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_verify_ssl() -> bool {
    true
}

impl AppConfig {
    /// Build configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration from a YAML file.
    ///
    /// `${VAR}`, `${VAR:-default}` and `${VAR:default}` placeholders are
    /// expanded before parsing, and environment overrides are applied after.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gemini_gateway::core::config::AppConfig;
    ///
    /// let config = AppConfig::load("gateway.yaml").expect("Failed to load config");
    /// ```
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let expanded = expand_env_vars(&content);

        let mut config: AppConfig = serde_yaml::from_str(&expanded)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Endpoint for `generateContent` on the configured model, without the key.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.upstream.api_base.trim_end_matches('/'),
            self.upstream.model
        )
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.server.port = port;
            }
        }

        if let Ok(api_base) = std::env::var("GEMINI_API_BASE") {
            if !api_base.trim().is_empty() {
                self.upstream.api_base = api_base;
            }
        }

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                self.upstream.model = model;
            }
        }

        if let Ok(verify_ssl_str) = std::env::var("VERIFY_SSL") {
            self.upstream.verify_ssl = str_to_bool(&verify_ssl_str);
        }

        if let Ok(timeout_str) = std::env::var("REQUEST_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                self.upstream.request_timeout_secs = Some(timeout);
            }
        }
    }
}

/// Expand environment variables in configuration content.
///
/// Supports patterns: ${VAR}, ${VAR:-default}, ${VAR:default}
fn expand_env_vars(content: &str) -> String {
    let re = Regex::new(r#"\$\{([^}:]+)(?::-?([^}]*))?\}"#).expect("valid placeholder regex");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
    })
    .to_string()
}

/// Convert string to boolean.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive)
fn str_to_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
