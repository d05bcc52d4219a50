use crate::domain::error::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[source] DomainError),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(cause) => {
                error!(error = %cause, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::from(DomainError::InvalidInput("Stock parameter is required".into()));
        assert_eq!(err.to_string(), "Stock parameter is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_errors_hide_details() {
        for cause in [
            DomainError::ProviderUnavailable("connection refused".into()),
            DomainError::ProviderBadResponse("not JSON".into()),
            DomainError::StoreUnavailable("disk I/O error".into()),
        ] {
            let err = AppError::from(cause);
            assert_eq!(err.to_string(), "Internal server error");
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
