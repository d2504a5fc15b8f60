//! Upstream access abstraction trait definition

mod provider_factory;

pub use provider_factory::{HttpProviderFactory, ProviderFactory};

// Re-export the upstream trait so frontends need only this crate
pub use usage_monitor_provider::UsageProvider;
