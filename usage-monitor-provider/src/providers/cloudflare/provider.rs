//! Cloudflare UsageProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::UsageProvider;
use crate::types::{ProviderAccount, UsageCounts, UsageWindow};

use super::query::UsageQueryRequest;
use super::types::sum_requests;
use super::{CloudflareAccount, CloudflareProvider, UsageData};

impl CloudflareProvider {
    /// 将 Cloudflare account 转换为 `ProviderAccount`
    pub(crate) fn account_to_provider_account(account: CloudflareAccount) -> ProviderAccount {
        ProviderAccount {
            id: account.id,
            name: account.name.unwrap_or_default(),
        }
    }

    /// 从 GraphQL `data` 中提取两类调用次数
    pub(crate) fn usage_from_data(data: Option<UsageData>) -> UsageCounts {
        let Some(account) = data
            .and_then(|d| d.viewer)
            .and_then(|v| v.accounts)
            .and_then(|accounts| accounts.into_iter().next())
        else {
            return UsageCounts::default();
        };

        UsageCounts {
            pages: sum_requests(account.pages_functions_invocations_adaptive_groups.as_deref()),
            workers: sum_requests(account.workers_invocations_adaptive.as_deref()),
        }
    }
}

#[async_trait]
impl UsageProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn list_accounts(&self) -> Result<Vec<ProviderAccount>> {
        let accounts: Vec<CloudflareAccount> = self.get("/accounts").await?.unwrap_or_default();
        log::debug!("[cloudflare] {} account(s) visible to token", accounts.len());
        Ok(accounts
            .into_iter()
            .map(Self::account_to_provider_account)
            .collect())
    }

    async fn get_usage(&self, account_id: &str, window: &UsageWindow) -> Result<UsageCounts> {
        let body = UsageQueryRequest::new(account_id, window);
        let data: Option<UsageData> = self.post_graphql(&body).await?;
        Ok(Self::usage_from_data(data))
    }
}
