//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::extract::ExtractionStore;
use crate::media::TikwmClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extractions: ExtractionStore,
    tikwm: TikwmClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractions = ExtractionStore::new(config.store.max_extractions);
        let tikwm = TikwmClient::new(&config.media.tikwm_endpoint);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                extractions,
                tikwm,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the extraction run store
    pub fn extractions(&self) -> &ExtractionStore {
        &self.inner.extractions
    }

    /// Get the TikTok lookup client
    pub fn tikwm(&self) -> &TikwmClient {
        &self.inner.tikwm
    }
}
