//! Provider 公共工具函数

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ProviderConfig;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(concat!("usage-monitor/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: "http".to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// 去掉 base URL 末尾的斜杠，便于直接拼接路径
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
