//! 类型定义模块

mod credential;
mod response;
mod usage;

pub use credential::Credential;
pub use response::UsageResponse;
pub use usage::{AggregationResult, FREE_LIMIT, UNKNOWN_ACCOUNT_NAME, UsageRecord};

// Re-export provider 库的公共类型
pub use usage_monitor_provider::{
    ProviderAccount, ProviderConfig, UsageCounts, UsageWindow, UsageWindowKind,
};
