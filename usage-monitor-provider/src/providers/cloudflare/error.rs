//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

impl CloudflareProvider {
    pub(crate) fn query_error(&self, message: String) -> ProviderError {
        ProviderError::QueryError {
            provider: self.provider_name().to_string(),
            message,
        }
    }
}

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/troubleshooting/>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, status: u16) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication error
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 6111: Invalid format for Authorization header
            // 9109: Unauthorized to access requested resource
            // 10000: Authentication error
            Some("6003" | "6103" | "6111" | "9109" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // Token lacks the required permission
            // 9106: Missing X-Auth-Key / insufficient scope
            // 10001: Unauthorized (permission)
            Some("9106" | "10001") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some(_) => self.unknown_error(raw),

            // No code: fall back to the HTTP status
            None => match status {
                401 => ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: non_empty(raw.message),
                },
                403 => ProviderError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: non_empty(raw.message),
                },
                200..=299 => self.unknown_error(raw),
                _ => self.status_error(status, non_empty(raw.message)),
            },
        }
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderConfig;

    fn provider() -> CloudflareProvider {
        CloudflareProvider::new(String::new(), &ProviderConfig::default()).unwrap()
    }

    #[test]
    fn auth_error_codes() {
        let p = provider();
        for code in ["6003", "6103", "6111", "9109", "10000"] {
            let err = p.map_error(RawApiError::with_code(code, "auth"), 400);
            assert!(
                matches!(err, ProviderError::InvalidCredentials { .. }),
                "code {code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn permission_error_codes() {
        let p = provider();
        for code in ["9106", "10001"] {
            let err = p.map_error(RawApiError::with_code(code, "scope"), 403);
            assert!(
                matches!(err, ProviderError::PermissionDenied { .. }),
                "code {code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn fallback_unknown_code() {
        let p = provider();
        let err = p.map_error(
            RawApiError::with_code("99999", "something unexpected"),
            400,
        );
        assert!(matches!(
            err,
            ProviderError::Unknown { raw_code, raw_message, .. }
                if raw_code.as_deref() == Some("99999") && raw_message == "something unexpected"
        ));
    }

    #[test]
    fn no_code_uses_http_status() {
        let p = provider();
        assert!(matches!(
            p.map_error(RawApiError::new(""), 401),
            ProviderError::InvalidCredentials {
                raw_message: None,
                ..
            }
        ));
        assert!(matches!(
            p.map_error(RawApiError::new("forbidden"), 403),
            ProviderError::PermissionDenied { .. }
        ));
        assert!(matches!(
            p.map_error(RawApiError::new(""), 500),
            ProviderError::HttpStatus {
                status: 500,
                raw_message: None,
                ..
            }
        ));
    }

    #[test]
    fn query_error_keeps_message() {
        let p = provider();
        assert!(matches!(
            p.query_error("bad filter".to_string()),
            ProviderError::QueryError { provider, message }
                if provider == "cloudflare" && message == "bad filter"
        ));
    }

    #[test]
    fn debug_output_redacts_token() {
        let p = CloudflareProvider::new("secret-token".to_string(), &ProviderConfig::default())
            .unwrap();
        let debug = format!("{p:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
