//! Error types shared across the cart service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Caller-side contract violations, rejected before the store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures of a single MCP tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// Only the search tool surfaces catalog failures; cart reads degrade instead.
    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

/// Error type returned by the REST handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cart(#[from] CartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Cart(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = CartError::Validation("username must not be empty".into());
        assert_eq!(err.to_string(), "Validation error: username must not be empty");
    }

    #[test]
    fn test_tool_error_wraps_validation_transparently() {
        let err = ToolError::from(CartError::Validation("quantity must be positive".into()));
        assert_eq!(err.to_string(), "Validation error: quantity must be positive");
    }

    #[test]
    fn test_app_error_status_codes() {
        let bad = AppError::Cart(CartError::Validation("x".into())).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
