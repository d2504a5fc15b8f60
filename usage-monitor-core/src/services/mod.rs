//! 业务逻辑服务层

mod usage_aggregator;
mod usage_service;

pub use usage_aggregator::{AggregatorOptions, UsageAggregator};
pub use usage_service::UsageService;

use std::sync::Arc;

use usage_monitor_provider::UsageProvider;

use crate::error::CoreResult;
use crate::traits::ProviderFactory;
use crate::types::Credential;

/// 服务上下文 - 持有所有依赖
///
/// 平台层创建此上下文，并注入配置中的凭证列表与 Provider 工厂。
pub struct ServiceContext {
    /// 配置的 API 凭证（只读，顺序仅影响日志）
    pub credentials: Vec<Credential>,
    /// Provider 工厂
    pub provider_factory: Arc<dyn ProviderFactory>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(credentials: Vec<Credential>, provider_factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            credentials,
            provider_factory,
        }
    }

    /// 获取凭证对应的 Provider 实例
    pub fn get_provider(&self, credential: &Credential) -> CoreResult<Arc<dyn UsageProvider>> {
        self.provider_factory.create(credential)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("credentials", &self.credentials.len())
            .finish_non_exhaustive()
    }
}
