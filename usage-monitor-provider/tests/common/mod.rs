//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use usage_monitor_provider::{ProviderConfig, UsageProvider, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 指向本地 mock server 的配置：不重试、短超时
pub fn mock_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        base_url: base_url.to_string(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        max_retries: 0,
    }
}

/// sandbox 禁止绑定 localhost 时跳过 httpmock 测试
pub fn should_skip_httpmock() -> bool {
    match std::net::TcpListener::bind(("127.0.0.1", 0)) {
        Ok(listener) => {
            drop(listener);
            false
        }
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("跳过测试: sandbox 禁止绑定 localhost");
            true
        }
        Err(err) => panic!("failed to bind localhost for httpmock tests: {err}"),
    }
}

/// 测试上下文 - 封装真实 API 的 Provider
pub struct TestContext {
    pub provider: Arc<dyn UsageProvider>,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文（读取 `CF_API_TOKEN`）
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CF_API_TOKEN").ok()?;
        let provider = create_provider(&api_token, &ProviderConfig::default()).ok()?;
        Some(Self { provider })
    }
}
