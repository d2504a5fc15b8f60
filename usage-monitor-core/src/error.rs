//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use usage_monitor_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No shared password is configured, so nobody can log in
    #[error("Password is not configured")]
    MissingPassword,

    /// The credential list is empty
    #[error("No API tokens configured")]
    NoCredentials,

    /// Login attempt with the wrong password
    #[error("Invalid password")]
    InvalidPassword,

    /// Any other configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// 是否为预期行为（密码错误、凭证失效等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidPassword | Self::NoCredentials => true,
            Self::Provider(e) => e.is_expected(),
            Self::MissingPassword | Self::Configuration(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
