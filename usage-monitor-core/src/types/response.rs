//! API 响应相关类型定义

use serde::{Deserialize, Serialize};

use super::{AggregationResult, UsageRecord};

/// JSON body of `GET /api/usage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageResponse {
    /// 是否成功
    pub success: bool,
    /// 各子账户用量
    pub accounts: Vec<UsageRecord>,
    /// 失败原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 是否来自缓存（为 false 时不输出）
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

impl UsageResponse {
    /// 由聚合结果构造响应
    #[must_use]
    pub fn from_result(result: AggregationResult, cached: bool) -> Self {
        Self {
            success: result.success,
            accounts: result.records,
            error: result.error,
            cached,
        }
    }

    /// 创建失败响应
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::from_result(AggregationResult::failure(error), false)
    }
}
