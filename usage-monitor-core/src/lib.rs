//! Usage Monitor Core Library
//!
//! Platform-independent business logic of the usage monitor:
//! - Bounded concurrency primitive ([`task_pool::BoundedTaskPool`])
//! - Two-level fan-out aggregation over credentials and their sub-accounts ([`services::UsageAggregator`])
//! - Single-slot, time-windowed memo of the last good aggregation ([`cache::ResultCache`])
//! - Cache + aggregator orchestration ([`services::UsageService`])
//! - Shared-password session gate ([`auth::AuthGate`])
//!
//! Upstream access goes through the [`traits::ProviderFactory`] seam, so the
//! web layer wires real HTTP providers and tests wire in-memory mocks.

pub mod auth;
pub mod cache;
pub mod error;
pub mod services;
pub mod task_pool;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use auth::AuthGate;
pub use cache::ResultCache;
pub use error::{CoreError, CoreResult};
pub use services::{ServiceContext, UsageAggregator, UsageService};
pub use task_pool::BoundedTaskPool;
pub use traits::{HttpProviderFactory, ProviderFactory};
