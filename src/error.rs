/*
 * Responsibility
 * - Error taxonomy of the lookup proxy (AppError)
 * - IntoResponse (HTTP status / `{"error": ...}` JSON body)
 * - Conversion from CnpjError (input validation)
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::services::cnpj::CnpjError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    // Upstream error body, relayed when it was valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cnpj query parameter is required")]
    MissingParameter,
    #[error("cnpj must contain exactly 14 digits, got {digits}")]
    InvalidFormat { digits: usize },
    #[error("invalid query string")]
    InvalidQuery { detail: String },
    #[error("cnpj not found upstream")]
    UpstreamNotFound { upstream: Option<Value> },
    #[error("upstream rate limit exceeded")]
    UpstreamRateLimited {
        retry_after: Option<u64>,
        upstream: Option<Value>,
    },
    #[error("upstream error (status {status})")]
    UpstreamServer { status: u16, upstream: Option<Value> },
    #[error("upstream unreachable")]
    NetworkFailure { detail: String },
    #[error("malformed upstream response")]
    MalformedUpstreamResponse { detail: String },
}

impl AppError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkFailure {
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter
            | AppError::InvalidFormat { .. }
            | AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::UpstreamRateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamServer { .. }
            | AppError::NetworkFailure { .. }
            | AppError::MalformedUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let (detail, upstream, retry_after) = match self {
            AppError::MissingParameter | AppError::InvalidFormat { .. } => (None, None, None),
            AppError::UpstreamNotFound { upstream } | AppError::UpstreamServer { upstream, .. } => {
                (None, upstream, None)
            }
            AppError::UpstreamRateLimited {
                retry_after,
                upstream,
            } => (None, upstream, retry_after),
            AppError::InvalidQuery { detail }
            | AppError::NetworkFailure { detail }
            | AppError::MalformedUpstreamResponse { detail } => (Some(detail), None, None),
        };

        let body = ErrorResponse {
            error,
            detail,
            upstream,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

impl From<CnpjError> for AppError {
    fn from(e: CnpjError) -> Self {
        match e {
            CnpjError::Missing => AppError::MissingParameter,
            CnpjError::WrongLength { digits } => AppError::InvalidFormat { digits },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_bad_request() {
        let response = AppError::MissingParameter.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "cnpj query parameter is required"})
        );

        let response = AppError::from(CnpjError::WrongLength { digits: 9 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "cnpj must contain exactly 14 digits, got 9"})
        );
    }

    #[tokio::test]
    async fn network_failure_carries_detail() {
        let response = AppError::network("connection refused").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"error": "upstream unreachable", "detail": "connection refused"})
        );
    }

    #[tokio::test]
    async fn rate_limit_forwards_retry_after() {
        let response = AppError::UpstreamRateLimited {
            retry_after: Some(60),
            upstream: Some(json!({"message": "Too many requests"})),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "upstream rate limit exceeded",
                "upstream": {"message": "Too many requests"}
            })
        );
    }

    #[test]
    fn upstream_taxonomy_statuses() {
        assert_eq!(
            AppError::UpstreamNotFound { upstream: None }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UpstreamServer {
                status: 503,
                upstream: None
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::malformed("expected value").status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
