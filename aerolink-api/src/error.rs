use aerolink_domain::DomainError;
use aerolink_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::ValidationError(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFoundError(format!("{} not found", what)),
            StoreError::Conflict(msg) => AppError::ConflictError(msg),
            StoreError::ReferenceSpaceExhausted(attempts) => AppError::InternalServerError(
                format!("booking reference space exhausted after {} attempts", attempts),
            ),
            StoreError::Database(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::AuthenticationError("no token".into()), StatusCode::UNAUTHORIZED),
            (AppError::ValidationError("bad cabin".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFoundError("flight not found".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("duplicate".into()), StatusCode::CONFLICT),
            (AppError::InternalServerError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::NotFound("flight").into();
        assert!(matches!(err, AppError::NotFoundError(_)));

        let err: AppError = StoreError::ReferenceSpaceExhausted(100).into();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[test]
    fn test_domain_error_mapping() {
        let err: AppError = DomainError::Validation("total_amount must be non-negative".into()).into();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
