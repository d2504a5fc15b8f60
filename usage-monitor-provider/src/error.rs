use serde::{Deserialize, Serialize};

/// Unified error type for all upstream operations.
///
/// Each variant includes a `provider` field identifying which upstream produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues, HTTP 502/503/504
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, gateway errors).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The bearer token is invalid, expired or revoked.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks the scope for the requested data.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The upstream answered with a non-success HTTP status that carried no mappable error code.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The analytics query returned a provider-reported error list.
    ///
    /// Only the first reported message is kept.
    QueryError {
        /// Provider that produced the error.
        provider: String,
        /// First error message of the response's `errors` array.
        message: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    ///
    /// This is a transient error and is automatically retried.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证失效、权限不足等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::HttpStatus {
                provider,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{provider}] HTTP {status}")
                }
            }
            Self::QueryError { provider, message } => {
                write!(f, "[{provider}] Query failed: {message}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: Some("Invalid API Token".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Invalid credentials: Invalid API Token"
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Invalid credentials");
    }

    #[test]
    fn display_http_status() {
        let e = ProviderError::HttpStatus {
            provider: "cloudflare".to_string(),
            status: 403,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] HTTP 403");

        let e = ProviderError::HttpStatus {
            provider: "cloudflare".to_string(),
            status: 400,
            raw_message: Some("bad request".to_string()),
        };
        assert_eq!(e.to_string(), "[cloudflare] HTTP 400: bad request");
    }

    #[test]
    fn display_query_error() {
        let e = ProviderError::QueryError {
            provider: "cloudflare".to_string(),
            message: "unknown field".to_string(),
        };
        assert_eq!(e.to_string(), "[cloudflare] Query failed: unknown field");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Rate limited");
    }

    #[test]
    fn display_timeout() {
        let e = ProviderError::Timeout {
            provider: "test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_permission_denied() {
        let e = ProviderError::PermissionDenied {
            provider: "test".to_string(),
            raw_message: Some("no access".to_string()),
        };
        assert_eq!(e.to_string(), "[test] Permission denied: no access");
    }

    #[test]
    fn display_parse_error() {
        let e = ProviderError::ParseError {
            provider: "test".to_string(),
            detail: "bad json".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Parse error: bad json");
    }

    #[test]
    fn display_unknown() {
        let e = ProviderError::Unknown {
            provider: "test".to_string(),
            raw_code: Some("E001".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[test] something broke");
    }

    #[test]
    fn serialize_carries_variant_code() {
        let e = ProviderError::HttpStatus {
            provider: "cloudflare".to_string(),
            status: 503,
            raw_message: None,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"HttpStatus\""));
        assert!(json.contains("\"status\":503"));
    }

    #[test]
    fn expected_and_transient_classification() {
        let invalid = ProviderError::InvalidCredentials {
            provider: "t".into(),
            raw_message: None,
        };
        assert!(invalid.is_expected());
        assert!(!invalid.is_transient());

        let network = ProviderError::NetworkError {
            provider: "t".into(),
            detail: "x".into(),
        };
        assert!(!network.is_expected());
        assert!(network.is_transient());

        let query = ProviderError::QueryError {
            provider: "t".into(),
            message: "x".into(),
        };
        assert!(!query.is_expected());
        assert!(!query.is_transient());
    }
}
