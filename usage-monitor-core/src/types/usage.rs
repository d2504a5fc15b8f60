//! 用量记录与聚合结果

use serde::{Deserialize, Serialize};

use usage_monitor_provider::{ProviderAccount, UsageCounts};

/// Daily free-tier request ceiling.
pub const FREE_LIMIT: u64 = 100_000;

/// Display name for sub-accounts the upstream returns without a name.
pub const UNKNOWN_ACCOUNT_NAME: &str = "Unknown account";

/// Usage of one sub-account in one aggregation run.
///
/// `total` is always `pages + workers` and `free_quota_remaining` is always
/// `free_limit - total` clamped at zero; both are derived in the constructors
/// and never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub account_id: String,
    pub account_name: String,
    pub pages: u64,
    pub workers: u64,
    pub total: u64,
    pub free_quota_remaining: u64,
    /// Set only when this sub-account's fetch failed; counts are then zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UsageRecord {
    /// Record for a successful fetch.
    #[must_use]
    pub fn new(account: &ProviderAccount, counts: UsageCounts, free_limit: u64) -> Self {
        let total = counts.total();
        Self {
            account_id: account.id.clone(),
            account_name: display_name(&account.name),
            pages: counts.pages,
            workers: counts.workers,
            total,
            free_quota_remaining: free_limit.saturating_sub(total),
            error: None,
        }
    }

    /// Failure marker for a sub-account whose usage could not be fetched.
    #[must_use]
    pub fn failed(account: &ProviderAccount, error: impl Into<String>, free_limit: u64) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(account, UsageCounts::default(), free_limit)
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Share of the daily allowance already used, in percent (0.0 to 100.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn usage_percent(&self) -> f64 {
        let denominator = self.total.saturating_add(self.free_quota_remaining);
        if denominator == 0 {
            return 0.0;
        }
        (self.total as f64 / denominator as f64 * 100.0).min(100.0)
    }
}

fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        UNKNOWN_ACCOUNT_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Outcome of one aggregation run.
///
/// Failure is encoded here rather than returned as an error, so callers
/// always get something renderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub success: bool,
    pub records: Vec<UsageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AggregationResult {
    #[must_use]
    pub fn success(records: Vec<UsageRecord>) -> Self {
        Self {
            success: true,
            records,
            error: None,
        }
    }

    /// Whole-run failure; never carries records.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            records: Vec::new(),
            error: Some(error.into()),
        }
    }
}
