use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use usher_upstream::UpstreamError;

use crate::cors;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid action specified in request body.")]
    InvalidAction,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid JSON in request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("Reservation API error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        // 401 is plain text with no JSON envelope and no CORS headers;
        // existing webhook callers depend on this shape.
        if let BrokerError::Unauthorized = self {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }

        let message = self.to_string();
        tracing::error!("request failed: {}", message);

        let mut response = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response();
        cors::apply(response.headers_mut());
        response
    }
}
