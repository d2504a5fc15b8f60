//! # usage-monitor-provider
//!
//! Thin client for the upstream APIs the usage monitor reads from. It issues
//! exactly two kinds of calls, both read-only:
//!
//! | Call | Endpoint | Purpose |
//! |------|----------|---------|
//! | [`UsageProvider::list_accounts`] | `GET {base}/accounts` | sub-accounts visible to one bearer token |
//! | [`UsageProvider::get_usage`] | `POST {base}/graphql` | Pages Functions + Workers request sums in a window |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls. Recommended for edge and container targets.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use usage_monitor_provider::{ProviderConfig, UsageWindow, UsageWindowKind, create_provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider("your-token", &ProviderConfig::default())?;
//!
//!     let window = UsageWindow::ending_now(UsageWindowKind::UtcDay);
//!     for account in provider.list_accounts().await? {
//!         let usage = provider.get_usage(&account.id, &window).await?;
//!         println!("{}: {} pages / {} workers", account.name, usage.pages, usage.workers);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Transient
//! errors (`NetworkError`, `Timeout`, `RateLimited`) are retried with
//! exponential backoff up to [`ProviderConfig::max_retries`] times; everything
//! else is reported immediately.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_http_client, create_provider, create_provider_with_client};

// Re-export core trait only (internal traits are not exported)
pub use traits::UsageProvider;

// Re-export types
pub use types::{ProviderAccount, ProviderConfig, UsageCounts, UsageWindow, UsageWindowKind};

// Re-export utils module
pub use utils::datetime;
pub use utils::log_sanitizer::mask_secret;

pub use providers::CloudflareProvider;
