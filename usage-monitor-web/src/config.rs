//! 应用配置
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. Every field has a default, so an empty file (or none) is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use usage_monitor_core::services::AggregatorOptions;
use usage_monitor_core::types::{Credential, FREE_LIMIT, ProviderConfig, UsageWindowKind};

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "USAGE_MONITOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub upstream: UpstreamConfig,
    pub usage: UsageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads; defaults to the number of logical CPUs.
    pub workers: Option<usize>,
    /// Adds `Secure` to the session cookie. Turn off only for plain-HTTP development.
    pub secure_cookie: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
            secure_cookie: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub api_tokens: Vec<String>,
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        let provider = ProviderConfig::default();
        Self {
            api_tokens: Vec::new(),
            base_url: provider.base_url,
            connect_timeout_secs: provider.connect_timeout.as_secs(),
            request_timeout_secs: provider.request_timeout.as_secs(),
            max_retries: provider.max_retries,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    pub cache_ttl_secs: u64,
    pub credential_concurrency: usize,
    pub account_concurrency: usize,
    pub free_limit: u64,
    pub window: UsageWindowKind,
}

impl Default for UsageConfig {
    fn default() -> Self {
        let options = AggregatorOptions::default();
        Self {
            cache_ttl_secs: 300,
            credential_concurrency: options.credential_concurrency,
            account_concurrency: options.account_concurrency,
            free_limit: FREE_LIMIT,
            window: options.window,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `usage_monitor_core=debug,info`.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: "usage-monitor.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the file named by `USAGE_MONITOR_CONFIG` (default `config.toml`)
    /// if it exists, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `PASSWORD`, `MULTI_CF_API_TOKENS`, `HOST`, `PORT`,
    /// `CACHE_TTL_SECS` and `LOG_LEVEL` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup("PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(tokens) = lookup("MULTI_CF_API_TOKENS") {
            // 原样保存，由 credentials() 统一拆分
            self.upstream.api_tokens = vec![tokens];
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
        }
        if let Some(ttl) = lookup("CACHE_TTL_SECS") {
            self.usage.cache_ttl_secs = ttl
                .trim()
                .parse()
                .with_context(|| format!("CACHE_TTL_SECS must be a number, got {ttl:?}"))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log.level = level;
        }
        Ok(())
    }

    /// Configured tokens. Each entry may hold a comma-separated list; entries
    /// are trimmed and empties dropped.
    pub fn credentials(&self) -> Vec<Credential> {
        self.upstream
            .api_tokens
            .iter()
            .flat_map(|entry| Credential::parse_list(entry))
            .collect()
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.upstream.base_url.clone(),
            connect_timeout: Duration::from_secs(self.upstream.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.upstream.request_timeout_secs),
            max_retries: self.upstream.max_retries,
        }
    }

    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions {
            credential_concurrency: self.usage.credential_concurrency.max(1),
            account_concurrency: self.usage.account_concurrency.max(1),
            free_limit: self.usage.free_limit,
            window: self.usage.window,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.usage.cache_ttl_secs)
    }

    pub fn workers(&self) -> usize {
        self.server.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}
