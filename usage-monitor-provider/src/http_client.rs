//! Generic HTTP client tools
//!
//! Shared request plumbing for upstream calls: sending, logging, transient-error
//! classification, and retry with backoff. Endpoint-specific code builds its own
//! `RequestBuilder` and decides how to interpret a non-success status.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound honoured for a server-provided `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Status code and body of a completed HTTP exchange.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status and body.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502/503/504 become
    /// [`ProviderError::NetworkError`], so the retry loop can pick them up.
    /// Every other status is handed back to the caller untouched.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<RawResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(RawResponse { status, body })
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request, retrying transient failures.
    ///
    /// # Retry strategy
    /// - Only [`ProviderError::is_transient`] errors are retried
    /// - `RateLimited` with `Retry-After` waits that long (capped at 30s)
    /// - Otherwise exponential backoff: 100ms, 200ms, 400ms, ... (capped at 10s)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<RawResponse, ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, provider_name, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, provider_name, method_name, url)
                    .await;
            };

            match Self::execute_request(req, provider_name, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_transient() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        method_name,
                        url,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Calculate retry delay
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10s
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
