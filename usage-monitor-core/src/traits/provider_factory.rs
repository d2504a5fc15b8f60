//! Provider factory abstract Trait

use std::sync::Arc;

use reqwest::Client;
use usage_monitor_provider::{
    ProviderConfig, UsageProvider, create_http_client, create_provider_with_client,
};

use crate::error::CoreResult;
use crate::types::Credential;

/// Builds the upstream client bound to one credential.
///
/// The aggregator calls this once per credential per run, so implementations
/// should be cheap. Tests inject in-memory providers through it.
pub trait ProviderFactory: Send + Sync {
    /// Create a provider for `credential`
    fn create(&self, credential: &Credential) -> CoreResult<Arc<dyn UsageProvider>>;
}

/// HTTP-backed factory
///
/// All providers share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpProviderFactory {
    client: Client,
    config: ProviderConfig,
}

impl HttpProviderFactory {
    /// Create the factory and its shared HTTP client
    pub fn new(config: ProviderConfig) -> CoreResult<Self> {
        let client = create_http_client(&config)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn create(&self, credential: &Credential) -> CoreResult<Arc<dyn UsageProvider>> {
        Ok(create_provider_with_client(
            self.client.clone(),
            credential.expose(),
            &self.config,
        )?)
    }
}
