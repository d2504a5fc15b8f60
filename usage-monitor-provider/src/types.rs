use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

// ============ Accounts ============

/// A sub-account visible to one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAccount {
    /// Opaque account identifier (the GraphQL `accountTag`).
    pub id: String,
    /// Human-readable account name. May be empty.
    #[serde(default)]
    pub name: String,
}

// ============ Usage ============

/// Request totals of one sub-account, split by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounts {
    /// Pages Functions invocations.
    pub pages: u64,
    /// Workers invocations.
    pub workers: u64,
}

impl UsageCounts {
    #[must_use]
    pub fn new(pages: u64, workers: u64) -> Self {
        Self { pages, workers }
    }

    /// Sum of both categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.pages.saturating_add(self.workers)
    }
}

/// How the start of a usage window is derived from its end.
///
/// # Default
///
/// [`UtcDay`](Self::UtcDay), which matches the free-tier daily reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageWindowKind {
    /// From 00:00:00.000 UTC of the current day to now.
    #[default]
    UtcDay,
    /// The trailing 24 hours ending now.
    Rolling24h,
}

/// Closed time interval `[start, end]` over which request counts are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UsageWindow {
    /// Window of the given kind ending at `now`.
    #[must_use]
    pub fn ending_at(kind: UsageWindowKind, now: DateTime<Utc>) -> Self {
        let start = match kind {
            UsageWindowKind::UtcDay => now.date_naive().and_time(NaiveTime::MIN).and_utc(),
            UsageWindowKind::Rolling24h => now - TimeDelta::days(1),
        };
        Self { start, end: now }
    }

    /// Window of the given kind ending at the current wall-clock time.
    #[must_use]
    pub fn ending_now(kind: UsageWindowKind) -> Self {
        Self::ending_at(kind, Utc::now())
    }
}

// ============ Client configuration ============

/// Cloudflare API v4 base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Connection settings shared by every provider instance.
///
/// # Default
///
/// Cloudflare's public API, 10s connect timeout, 30s request timeout, 2 retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Deadline for a single upstream call, including reading the body.
    pub request_timeout: Duration,
    /// Retries for transient failures (0 disables retrying).
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}
