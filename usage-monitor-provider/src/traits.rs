use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ProviderAccount, UsageCounts, UsageWindow};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 为数字码的字符串形式）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, status: u16) -> ProviderError;

    /// 快捷方法：HTTP 状态错误（响应体中没有可识别的错误信息）
    fn status_error(&self, status: u16, raw_message: Option<String>) -> ProviderError {
        ProviderError::HttpStatus {
            provider: self.provider_name().to_string(),
            status,
            raw_message,
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Upstream usage source bound to a single credential.
///
/// Both operations are read-only and idempotent.
#[async_trait]
pub trait UsageProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// List the sub-accounts visible to this credential.
    ///
    /// An empty list is a valid answer, not an error.
    async fn list_accounts(&self) -> Result<Vec<ProviderAccount>>;

    /// Sum the request counts of one sub-account over `window`.
    ///
    /// Categories the upstream omits count as zero.
    async fn get_usage(&self, account_id: &str, window: &UsageWindow) -> Result<UsageCounts>;
}
