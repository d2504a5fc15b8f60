//! Cloudflare usage provider
//!
//! Accounts come from the REST API, request counts from the GraphQL
//! Analytics API. One instance wraps exactly one API token.

mod error;
mod http;
mod provider;
mod query;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};
use crate::types::ProviderConfig;

pub(crate) use types::{CloudflareAccount, CloudflareResponse, GraphqlResponse, UsageData};

/// Cloudflare usage provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

impl CloudflareProvider {
    /// Build a provider with its own HTTP client.
    pub fn new(api_token: String, config: &ProviderConfig) -> Result<Self> {
        let client = create_http_client(config)?;
        Ok(Self::with_client(client, api_token, config))
    }

    /// Build a provider on top of an existing (shared) HTTP client.
    ///
    /// Timeouts configured on `client` apply; only `base_url` and
    /// `max_retries` are read from `config`.
    pub fn with_client(client: Client, api_token: String, config: &ProviderConfig) -> Self {
        Self {
            client,
            api_token,
            base_url: normalize_base_url(&config.base_url),
            max_retries: config.max_retries,
        }
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
