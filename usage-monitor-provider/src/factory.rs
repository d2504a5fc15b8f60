//! Provider factory functions.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::CloudflareProvider;
use crate::traits::UsageProvider;
use crate::types::ProviderConfig;

/// Creates the shared HTTP client described by `config`.
///
/// Cloning the returned client is cheap; all clones share one connection pool.
pub fn create_http_client(config: &ProviderConfig) -> Result<Client> {
    crate::providers::common::create_http_client(config)
}

/// Creates a [`UsageProvider`] for one API token with its own HTTP client.
///
/// # Examples
///
/// ```rust,no_run
/// use usage_monitor_provider::{create_provider, ProviderConfig};
///
/// let provider = create_provider("your-token", &ProviderConfig::default()).unwrap();
/// ```
pub fn create_provider(api_token: &str, config: &ProviderConfig) -> Result<Arc<dyn UsageProvider>> {
    let client = create_http_client(config)?;
    create_provider_with_client(client, api_token, config)
}

/// Creates a [`UsageProvider`] for one API token on top of a shared client.
pub fn create_provider_with_client(
    client: Client,
    api_token: &str,
    config: &ProviderConfig,
) -> Result<Arc<dyn UsageProvider>> {
    let api_token = api_token.trim();
    if api_token.is_empty() {
        return Err(ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: Some("API token is empty".to_string()),
        });
    }

    Ok(Arc::new(CloudflareProvider::with_client(
        client,
        api_token.to_string(),
        config,
    )))
}
