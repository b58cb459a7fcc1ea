//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::gene_functions::SummarizeGeneFunctionsError;
use crate::idmapping::IdMappingError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] IdMappingError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(IdMappingError::PollTimeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code carried in the error body
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "INVALID_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::GATEWAY_TIMEOUT => "UPSTREAM_TIMEOUT",
            StatusCode::BAD_GATEWAY => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let body = match self {
            AppError::InvalidRequest(message) => {
                tracing::debug!("Rejected request: {}", message);
                ErrorResponse::new(code, message)
            },
            AppError::NotFound(message) => ErrorResponse::new(code, message),
            AppError::Upstream(IdMappingError::JobFailed {
                ref job_id,
                ref status,
                ref messages,
            }) => {
                tracing::error!(job_id = %job_id, status = %status, "UniProt job failed: {:?}", messages);
                ErrorResponse::with_details(
                    code,
                    format!("UniProt job {} ended with status {}", job_id, status),
                    json!({ "jobId": job_id, "status": status, "messages": messages }),
                )
            },
            AppError::Upstream(ref e) if e.is_upstream() => {
                tracing::error!("UniProt error: {}", e);
                ErrorResponse::new(code, e.to_string())
            },
            AppError::Upstream(ref e) => {
                tracing::error!("Mapping error: {:?}", e);
                ErrorResponse::new(code, "Failed to process UniProt results")
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ErrorResponse::new(code, "An internal error occurred")
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SummarizeGeneFunctionsError> for AppError {
    fn from(err: SummarizeGeneFunctionsError) -> Self {
        match err {
            SummarizeGeneFunctionsError::Mapping(e) => AppError::Upstream(e),
            other => AppError::InvalidRequest(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::validation::GeneListValidationError;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("/api/v1/x".into()), StatusCode::NOT_FOUND),
            (
                AppError::Upstream(IdMappingError::Submission("refused".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Upstream(IdMappingError::PollTimeout {
                    job_id: "j1".into(),
                    attempts: 3,
                    elapsed: Duration::from_secs(3),
                }),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                AppError::Upstream(IdMappingError::Transform {
                    index: 0,
                    reason: "missing field `to`".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(AppError::InvalidRequest("x".into()).code(), "INVALID_REQUEST");
        assert_eq!(
            AppError::Upstream(IdMappingError::poll("j1", "HTTP 500")).code(),
            "UPSTREAM_ERROR"
        );
        assert_eq!(AppError::Internal("x".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_validation_errors_become_invalid_request() {
        let err: AppError = SummarizeGeneFunctionsError::from(GeneListValidationError::Empty).into();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err: AppError =
            SummarizeGeneFunctionsError::from(IdMappingError::Submission("x".into())).into();
        assert!(matches!(err, AppError::Upstream(IdMappingError::Submission(_))));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Upstream(IdMappingError::JobFailed {
            job_id: "j1".into(),
            status: "ERROR".into(),
            messages: vec!["bad taxId".into()],
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
