//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Lumina Luxe                            │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── ValidationError ("email is invalid") ──┐                    │
//! │         ├── CoreError::InvalidPromoCode ───────────┤                    │
//! │         ├── CoreError::IllegalTransition ──────────┼──► ApiError        │
//! │         ├── DbError (startup only) ────────────────┘    {code, message} │
//! │         │                                                               │
//! │         └── AI failures never get here: the gateway returns fallbacks   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The front end receives:
//! ```json
//! { "code": "INVALID_PROMO_CODE", "message": "Invalid promo code: SUMMER2" }
//! ```

use lumina_core::{CoreError, ValidationError};
use lumina_db::DbError;
use serde::Serialize;
use ts_rs::TS;

/// API error returned from storefront commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity not found
    NotFound,

    /// Form input failed validation
    ValidationError,

    /// Promo code not recognised
    InvalidPromoCode,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Order status change refused
    IllegalTransition,

    /// Storage failure
    DatabaseError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPromoCode(_) => {
                ApiError::new(ErrorCode::InvalidPromoCode, err.to_string())
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::IllegalTransition { .. } => {
                ApiError::new(ErrorCode::IllegalTransition, err.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            other => {
                // Log the detail, return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for storefront commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::OrderStatus;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::from(CoreError::InvalidPromoCode("SUMMER2".to_string()));
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "INVALID_PROMO_CODE");
        assert_eq!(json["message"], "Invalid promo code: SUMMER2");
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "email".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_illegal_transition_code() {
        let err = ApiError::from(CoreError::IllegalTransition {
            order_id: "ORD-5501".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });
        assert_eq!(err.code, ErrorCode::IllegalTransition);
        assert!(err.message.contains("ORD-5501"));
    }

    #[test]
    fn test_db_errors_hide_detail() {
        let err = ApiError::from(DbError::QueryFailed("no such table: collections".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }
}
