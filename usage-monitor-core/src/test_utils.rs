//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use usage_monitor_provider::{
    ProviderAccount, ProviderError, UsageCounts, UsageProvider, UsageWindow,
};

use crate::error::{CoreError, CoreResult};
use crate::services::{AggregatorOptions, ServiceContext, UsageAggregator};
use crate::traits::ProviderFactory;
use crate::types::Credential;

// ===== ConcurrencyGauge =====

/// 记录同时进行中的 `get_usage` 调用数及峰值
#[derive(Default)]
pub struct ConcurrencyGauge {
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    fn enter(&self) {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.running.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

// ===== MockProvider =====

pub struct MockProvider {
    accounts: Vec<ProviderAccount>,
    usage: HashMap<String, Result<UsageCounts, ProviderError>>,
    list_error: Option<ProviderError>,
    delay: Duration,
    gauge: Arc<ConcurrencyGauge>,
    list_calls: AtomicUsize,
    usage_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            usage: HashMap::new(),
            list_error: None,
            delay: Duration::ZERO,
            gauge: Arc::new(ConcurrencyGauge::default()),
            list_calls: AtomicUsize::new(0),
            usage_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_account(
        mut self,
        account: ProviderAccount,
        usage: Result<UsageCounts, ProviderError>,
    ) -> Self {
        self.usage.insert(account.id.clone(), usage);
        self.accounts.push(account);
        self
    }

    pub fn with_list_error(mut self, err: ProviderError) -> Self {
        self.list_error = Some(err);
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn usage_calls(&self) -> usize {
        self.usage_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsageProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_accounts(&self) -> Result<Vec<ProviderAccount>, ProviderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self.accounts.clone())
    }

    async fn get_usage(
        &self,
        account_id: &str,
        _window: &UsageWindow,
    ) -> Result<UsageCounts, ProviderError> {
        self.usage_calls.fetch_add(1, Ordering::SeqCst);
        self.gauge.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.gauge.exit();
        self.usage
            .get(account_id)
            .cloned()
            .unwrap_or(Ok(UsageCounts::default()))
    }
}

// ===== MockProviderFactory =====

/// 按凭证原文查找预置的 `MockProvider`，未知凭证返回 `InvalidCredentials`
pub struct MockProviderFactory {
    providers: HashMap<String, Arc<MockProvider>>,
    gauge: Arc<ConcurrencyGauge>,
}

impl MockProviderFactory {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            gauge: Arc::new(ConcurrencyGauge::default()),
        }
    }

    /// 注册 provider，所有 provider 共享同一个并发计数器
    pub fn with(mut self, secret: &str, mut provider: MockProvider) -> Self {
        provider.gauge = Arc::clone(&self.gauge);
        self.providers.insert(secret.to_string(), Arc::new(provider));
        self
    }

    pub fn gauge(&self) -> Arc<ConcurrencyGauge> {
        Arc::clone(&self.gauge)
    }

    pub fn provider(&self, secret: &str) -> Option<Arc<MockProvider>> {
        self.providers.get(secret).cloned()
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create(&self, credential: &Credential) -> CoreResult<Arc<dyn UsageProvider>> {
        match self.providers.get(credential.expose()) {
            Some(provider) => Ok(Arc::clone(provider) as Arc<dyn UsageProvider>),
            None => Err(CoreError::Provider(ProviderError::InvalidCredentials {
                provider: "mock".to_string(),
                raw_message: Some("unknown token".to_string()),
            })),
        }
    }
}

// ===== 工厂方法 =====

pub fn account(id: &str, name: &str) -> ProviderAccount {
    ProviderAccount {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// 模拟上游非 2xx 响应
pub fn upstream_error(status: u16) -> ProviderError {
    ProviderError::HttpStatus {
        provider: "mock".to_string(),
        status,
        raw_message: None,
    }
}

/// 创建使用默认参数的聚合器（凭证由调用方传入）
pub fn create_test_aggregator(
    factory: MockProviderFactory,
) -> (UsageAggregator, Arc<ServiceContext>) {
    let ctx = Arc::new(ServiceContext::new(Vec::new(), Arc::new(factory)));
    let aggregator = UsageAggregator::new(Arc::clone(&ctx), AggregatorOptions::default());
    (aggregator, ctx)
}
