//! Application state shared by all workers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use usage_monitor_core::services::{AggregatorOptions, ServiceContext, UsageService};
use usage_monitor_core::traits::{HttpProviderFactory, ProviderFactory};
use usage_monitor_core::types::Credential;
use usage_monitor_core::{AuthGate, ResultCache};

use crate::config::AppConfig;

/// Service container. Built once at startup and shared through `web::Data`.
pub struct AppState {
    pub usage_service: UsageService,
    pub auth: AuthGate,
    /// Whether the session cookie carries `Secure`
    pub secure_cookie: bool,
}

impl AppState {
    /// Wires real HTTP providers from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let factory = HttpProviderFactory::new(config.provider_config())?;
        Ok(AppStateBuilder::new()
            .credentials(config.credentials())
            .provider_factory(Arc::new(factory))
            .password(config.auth.password.clone())
            .options(config.aggregator_options())
            .cache_ttl(config.cache_ttl())
            .secure_cookie(config.server.secure_cookie)
            .build()?)
    }
}

/// Builder for [`AppState`]; tests use it to inject mock factories.
pub struct AppStateBuilder {
    credentials: Vec<Credential>,
    provider_factory: Option<Arc<dyn ProviderFactory>>,
    password: Option<String>,
    options: AggregatorOptions,
    cache_ttl: Duration,
    secure_cookie: bool,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: Vec::new(),
            provider_factory: None,
            password: None,
            options: AggregatorOptions::default(),
            cache_ttl: ResultCache::DEFAULT_TTL,
            secure_cookie: true,
        }
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Vec<Credential>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn provider_factory(mut self, factory: Arc<dyn ProviderFactory>) -> Self {
        self.provider_factory = Some(factory);
        self
    }

    #[must_use]
    pub fn password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    #[must_use]
    pub fn options(mut self, options: AggregatorOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn secure_cookie(mut self, secure: bool) -> Self {
        self.secure_cookie = secure;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::Configuration` if no provider factory was given.
    pub fn build(self) -> usage_monitor_core::CoreResult<AppState> {
        let provider_factory = self.provider_factory.ok_or_else(|| {
            usage_monitor_core::CoreError::Configuration(
                "provider_factory is required".to_string(),
            )
        })?;

        if self.password.as_deref().is_none_or(|p| p.trim().is_empty()) {
            tracing::warn!("PASSWORD is not set; every gated route will answer 500");
        }
        if self.credentials.is_empty() {
            tracing::warn!("No API tokens configured; usage queries will fail");
        }

        let ctx = Arc::new(ServiceContext::new(self.credentials, provider_factory));
        let cache = Arc::new(ResultCache::new(self.cache_ttl));
        let usage_service = UsageService::new(ctx, self.options, cache);

        Ok(AppState {
            usage_service,
            auth: AuthGate::new(self.password.as_deref()),
            secure_cookie: self.secure_cookie,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
