//! 多凭证用量聚合
//!
//! Two nested bounded fan-outs: credentials on the outside (fail-fast),
//! sub-accounts of one credential on the inside (failures become records).
//! With the default caps at most 3 × 5 upstream calls are in flight.

use std::sync::Arc;

use usage_monitor_provider::{ProviderAccount, UsageProvider, UsageWindow, UsageWindowKind};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::task_pool::BoundedTaskPool;
use crate::types::{AggregationResult, Credential, FREE_LIMIT, UsageRecord};

/// Aggregation tuning.
///
/// # Default
///
/// 3 credentials and 5 sub-accounts per credential in flight, a free limit of
/// 100 000 requests, and the UTC-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub credential_concurrency: usize,
    pub account_concurrency: usize,
    pub free_limit: u64,
    pub window: UsageWindowKind,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            credential_concurrency: 3,
            account_concurrency: 5,
            free_limit: FREE_LIMIT,
            window: UsageWindowKind::UtcDay,
        }
    }
}

/// 用量聚合器
pub struct UsageAggregator {
    ctx: Arc<ServiceContext>,
    options: AggregatorOptions,
}

impl UsageAggregator {
    /// 创建聚合器实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, options: AggregatorOptions) -> Self {
        Self { ctx, options }
    }

    #[must_use]
    pub fn options(&self) -> &AggregatorOptions {
        &self.options
    }

    /// Aggregates usage over every sub-account of every credential.
    ///
    /// Never fails: a credential whose account list cannot be fetched turns
    /// the whole run into `success: false`, while a single sub-account
    /// failure only marks that record.
    pub async fn aggregate(&self, credentials: &[Credential]) -> AggregationResult {
        let window = UsageWindow::ending_now(self.options.window);
        self.aggregate_in(credentials, &window).await
    }

    /// [`aggregate`](Self::aggregate) over an explicit window.
    pub async fn aggregate_in(
        &self,
        credentials: &[Credential],
        window: &UsageWindow,
    ) -> AggregationResult {
        log::debug!(
            "Aggregating usage for {} credential(s), window {} .. {}",
            credentials.len(),
            window.start,
            window.end
        );

        let pool = BoundedTaskPool::new(self.options.credential_concurrency);
        let tasks = credentials
            .iter()
            .map(|credential| self.collect_credential(credential, window));

        match pool.try_run(tasks).await {
            Ok(groups) => {
                let records: Vec<UsageRecord> = groups.into_iter().flatten().collect();
                let failed = records.iter().filter(|r| r.is_failed()).count();
                log::info!(
                    "Aggregated {} record(s), {failed} failed",
                    records.len()
                );
                AggregationResult::success(records)
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Aggregation failed: {e}");
                } else {
                    log::error!("Aggregation failed: {e}");
                }
                AggregationResult::failure(e.to_string())
            }
        }
    }

    /// All records of one credential. Fails only if its account list fails.
    async fn collect_credential(
        &self,
        credential: &Credential,
        window: &UsageWindow,
    ) -> CoreResult<Vec<UsageRecord>> {
        let provider = self.ctx.get_provider(credential)?;
        let accounts = provider.list_accounts().await.map_err(|e| {
            log::warn!(
                "Failed to list accounts for token {}: {e}",
                credential.masked()
            );
            CoreError::Provider(e)
        })?;

        log::debug!(
            "Token {} sees {} account(s)",
            credential.masked(),
            accounts.len()
        );

        let pool = BoundedTaskPool::new(self.options.account_concurrency);
        let provider = &provider;
        let tasks = accounts
            .iter()
            .map(|account| self.fetch_record(provider, account, window));

        Ok(pool
            .run_settled(tasks)
            .await
            .into_iter()
            .map(|settled| settled.unwrap_or_else(|failed| failed))
            .collect())
    }

    /// One sub-account. The error side already holds the failure marker.
    async fn fetch_record(
        &self,
        provider: &Arc<dyn UsageProvider>,
        account: &ProviderAccount,
        window: &UsageWindow,
    ) -> Result<UsageRecord, UsageRecord> {
        let free_limit = self.options.free_limit;
        match provider.get_usage(&account.id, window).await {
            Ok(counts) => Ok(UsageRecord::new(account, counts, free_limit)),
            Err(e) => {
                log::warn!("Failed to fetch usage for account {}: {e}", account.id);
                Err(UsageRecord::failed(account, e.to_string(), free_limit))
            }
        }
    }
}
