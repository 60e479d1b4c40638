//! Secret lookup.
//!
//! Handlers never read the process environment directly; they ask an injected
//! [`SecretSource`] so tests can substitute an in-memory store.

use std::collections::HashMap;

/// Read-only access to named secrets.
pub trait SecretSource: Send + Sync + 'static {
    /// Return the secret stored under `name`, or `None` if it is unset or blank.
    fn secret(&self, name: &str) -> Option<String>;
}

/// Secrets provisioned through process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Fixed in-memory secrets.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the secret stored under `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}
