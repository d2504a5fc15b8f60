//! HTTP error payloads and mapping from core errors.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use usage_monitor_core::CoreError;

/// Handler error. Always rendered as `{"success": false, "error": ...}`.
#[derive(Debug)]
pub enum WebError {
    /// No valid session cookie
    Unauthorized,
    Core(CoreError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Not logged in"),
            Self::Core(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<CoreError> for WebError {
    fn from(value: CoreError) -> Self {
        Self::Core(value)
    }
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Core(CoreError::InvalidPassword) => StatusCode::UNAUTHORIZED,
            Self::Core(CoreError::Provider(_)) => StatusCode::BAD_GATEWAY,
            Self::Core(
                CoreError::MissingPassword | CoreError::NoCredentials | CoreError::Configuration(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::warn!(error = %message, "request rejected");
        }
        HttpResponse::build(status).json(ErrorBody {
            success: false,
            error: &message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: WebError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn unauthorized_payload() {
        let err = WebError::Unauthorized;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({"success": false, "error": "Not logged in"})
        );
    }

    #[actix_web::test]
    async fn missing_password_is_server_error() {
        let err = WebError::from(CoreError::MissingPassword);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(err).await["error"],
            "Password is not configured"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            WebError::from(CoreError::InvalidPassword).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebError::from(CoreError::Configuration("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
