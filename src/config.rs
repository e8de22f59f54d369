//! Environment-driven configuration.
//!
//! Everything is read once at startup. A variable required by the
//! selected analysis strategy that is absent fails fast with a
//! descriptive error instead of silently degrading.

use std::net::SocketAddr;

use crate::gateway::model::{DEFAULT_MODEL, DEFAULT_MODEL_BASE_URL};
use crate::gateway::storage::DEFAULT_BUCKET;
use crate::gateway::Strategy;
use crate::i18n::Locale;

pub const APP_NAME: &str = "Skinscope";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub fn default_log_filter() -> String {
    "skinscope=info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set; the {strategy} strategy requires it")]
    MissingVar {
        var: &'static str,
        strategy: Strategy,
    },
    #[error("ANALYSIS_STRATEGY must be one of direct, staged, delegated (got {0:?})")]
    UnknownStrategy(String),
    #[error("BIND_ADDR is not a valid socket address: {0:?}")]
    InvalidBindAddr(String),
}

/// Generative model endpoint settings.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Object storage settings.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    pub url: String,
    pub service_key: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub strategy: Strategy,
    pub bind_addr: SocketAddr,
    pub locale: Locale,
    /// Present when GEMINI_API_KEY is set. Required for the direct and
    /// staged strategies and the vision endpoint.
    pub model: Option<ModelConfig>,
    /// Present when the storage variables are set. Required for the
    /// staged strategy and the upload endpoint.
    pub object_store: Option<ObjectStoreConfig>,
    /// Delegated analysis service base URL.
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Lets tests supply
    /// variables without mutating process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let strategy = match get("ANALYSIS_STRATEGY") {
            Some(raw) => {
                Strategy::parse(&raw).ok_or(ConfigError::UnknownStrategy(raw))?
            }
            None => Strategy::Delegated,
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw))?;

        let locale = get("APP_LOCALE")
            .map(|tag| Locale::parse(&tag))
            .unwrap_or_default();

        let model = get("GEMINI_API_KEY").map(|api_key| ModelConfig {
            api_key,
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_MODEL_BASE_URL.to_string()),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        });

        let object_store = match (get("SUPABASE_URL"), get("SUPABASE_SERVICE_ROLE_KEY")) {
            (Some(url), Some(service_key)) => Some(ObjectStoreConfig {
                url,
                service_key,
                bucket: get("SUPABASE_STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            }),
            _ => None,
        };

        let backend_url = get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let config = Self {
            strategy,
            bind_addr,
            locale,
            model,
            object_store,
            backend_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Verify that everything the selected strategy needs is present.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.strategy {
            Strategy::Direct => {
                if self.model.is_none() {
                    return Err(ConfigError::MissingVar {
                        var: "GEMINI_API_KEY",
                        strategy: self.strategy,
                    });
                }
            }
            Strategy::Staged => {
                if self.model.is_none() {
                    return Err(ConfigError::MissingVar {
                        var: "GEMINI_API_KEY",
                        strategy: self.strategy,
                    });
                }
                if self.object_store.is_none() {
                    return Err(ConfigError::MissingVar {
                        var: "SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY",
                        strategy: self.strategy,
                    });
                }
            }
            // BACKEND_URL has a default, so delegated always validates.
            Strategy::Delegated => {}
        }
        Ok(())
    }
}
