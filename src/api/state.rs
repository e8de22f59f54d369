//! Shared state for the API router.

use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::gateway::{
    DelegatedGateway, DirectGateway, Gateway, ModelClient, ObjectStoreClient, StagedGateway,
    Strategy,
};
use crate::i18n::Locale;
use crate::store::SessionReportStore;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub store: Arc<SessionReportStore>,
    /// Present when a model API key is configured.
    pub model: Option<ModelClient>,
    /// Present when object storage is configured.
    pub storage: Option<ObjectStoreClient>,
    pub http: reqwest::Client,
    pub locale: Locale,
}

impl AppState {
    /// Assemble clients and the strategy-selected gateway from a
    /// validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let model = config
            .model
            .as_ref()
            .map(|m| ModelClient::new(&m.base_url, &m.api_key, &m.model));

        let storage = config
            .object_store
            .as_ref()
            .map(|s| ObjectStoreClient::new(&s.url, &s.service_key, &s.bucket));

        let gateway = match config.strategy {
            Strategy::Direct => {
                let model = model.clone().ok_or(ConfigError::MissingVar {
                    var: "GEMINI_API_KEY",
                    strategy: Strategy::Direct,
                })?;
                Gateway::Direct(DirectGateway::new(model, config.locale))
            }
            Strategy::Staged => {
                let model = model.clone().ok_or(ConfigError::MissingVar {
                    var: "GEMINI_API_KEY",
                    strategy: Strategy::Staged,
                })?;
                let storage = storage.clone().ok_or(ConfigError::MissingVar {
                    var: "SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY",
                    strategy: Strategy::Staged,
                })?;
                Gateway::Staged(StagedGateway::new(storage, model, config.locale))
            }
            Strategy::Delegated => {
                Gateway::Delegated(DelegatedGateway::new(&config.backend_url))
            }
        };

        Ok(Self {
            gateway: Arc::new(gateway),
            store: Arc::new(SessionReportStore::new()),
            model,
            storage,
            http: reqwest::Client::new(),
            locale: config.locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegated_state_needs_no_clients() {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.gateway.strategy(), Strategy::Delegated);
        assert!(state.model.is_none());
        assert!(state.storage.is_none());
        assert!(state.store.is_empty());
    }

    #[test]
    fn staged_state_builds_both_clients() {
        let config = Config::from_lookup(|name| {
            match name {
                "ANALYSIS_STRATEGY" => Some("staged".to_string()),
                "GEMINI_API_KEY" => Some("key".to_string()),
                "SUPABASE_URL" => Some("http://store.local".to_string()),
                "SUPABASE_SERVICE_ROLE_KEY" => Some("service".to_string()),
                _ => None,
            }
        })
        .unwrap();

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.gateway.strategy(), Strategy::Staged);
        assert!(state.model.is_some());
        assert!(state.storage.is_some());
    }
}
