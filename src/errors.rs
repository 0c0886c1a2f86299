use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected by a validation rule; the message is user-facing.
    #[error("{0}")]
    Rejected(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Internal(msg) => AppError::Internal(msg),
            rejection => AppError::Rejected(rejection.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Rejected(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use uuid::Uuid;

    #[test]
    fn rejected_returns_400() {
        let resp = AppError::Rejected("bad request".to_string()).error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn customer_not_found_maps_to_rejection() {
        let app_err: AppError = DomainError::CustomerNotFound.into();
        assert!(matches!(app_err, AppError::Rejected(_)));
    }

    #[test]
    fn insufficient_stock_maps_to_rejection() {
        let app_err: AppError = DomainError::InsufficientStock(vec![Uuid::new_v4()]).into();
        assert!(matches!(app_err, AppError::Rejected(_)));
    }

    #[test]
    fn duplicate_product_keeps_user_facing_message() {
        let app_err: AppError = DomainError::DuplicateProduct("Widget".to_string()).into();
        assert_eq!(app_err.to_string(), "Product 'Widget' is already registered");
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
