//! 用量查询服务
//!
//! Cache in front of the aggregator. Only successful runs are memoized, so a
//! failed upstream is retried on the next request.

use std::sync::Arc;

use crate::cache::ResultCache;
use crate::error::CoreError;
use crate::services::{AggregatorOptions, ServiceContext, UsageAggregator};
use crate::types::UsageResponse;

/// 用量查询服务
pub struct UsageService {
    ctx: Arc<ServiceContext>,
    aggregator: UsageAggregator,
    cache: Arc<ResultCache>,
}

impl UsageService {
    /// 创建服务实例
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        options: AggregatorOptions,
        cache: Arc<ResultCache>,
    ) -> Self {
        let aggregator = UsageAggregator::new(Arc::clone(&ctx), options);
        Self {
            ctx,
            aggregator,
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Current usage of all configured credentials.
    ///
    /// `force_refresh` skips the cache lookup; the fresh result still
    /// replaces the memo when it succeeds.
    pub async fn get_usage(&self, force_refresh: bool) -> UsageResponse {
        if self.ctx.credentials.is_empty() {
            log::warn!("{}", CoreError::NoCredentials);
            return UsageResponse::failure(CoreError::NoCredentials.to_string());
        }

        if !force_refresh
            && let Some(result) = self.cache.get().await
        {
            log::debug!("Serving usage from cache ({} record(s))", result.records.len());
            return UsageResponse::from_result(result, true);
        }

        let result = self.aggregator.aggregate(&self.ctx.credentials).await;
        if result.success {
            self.cache.set(result.clone()).await;
        }
        UsageResponse::from_result(result, false)
    }
}
