//! HTTP binding for the inventory.
//!
//! One `Inventory` is shared by every request behind an async mutex, so
//! mutations issued through the same server run one at a time. Each
//! mutating route answers with the refreshed projection.

pub mod handlers;

use crate::core::{GatewayError, InventoryError};
use crate::inventory::Inventory;
use axum::Json;
use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Mutex<Inventory>>,
}

impl AppState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Arc::new(Mutex::new(inventory)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/api/v1/items",
            get(handlers::list_items).post(handlers::add_item),
        )
        .route("/api/v1/items/:name", delete(handlers::delete_quantity))
        .route(
            "/api/v1/items/:name/increment",
            post(handlers::increment_one),
        )
        .route(
            "/api/v1/items/:name/decrement",
            post(handlers::decrement_one),
        )
        .route("/api/v1/categories", get(handlers::list_categories))
        .route("/api/v1/state", get(handlers::view_state))
        .route("/api/v1/state/error", delete(handlers::clear_error))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug)]
pub enum WebError {
    Inventory(InventoryError),
    Validation(String),
    /// Body or query string that could not be decoded.
    Malformed(StatusCode, String),
}

impl WebError {
    pub fn validation(message: impl Into<String>) -> Self {
        WebError::Validation(message.into())
    }
}

impl From<InventoryError> for WebError {
    fn from(err: InventoryError) -> Self {
        WebError::Inventory(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::Malformed(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        WebError::Malformed(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            WebError::Inventory(InventoryError::CategoryConflict { .. }) => {
                (StatusCode::CONFLICT, "category_conflict")
            }
            WebError::Inventory(InventoryError::ItemNotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            WebError::Inventory(InventoryError::Gateway(GatewayError::InvalidKey(..))) => {
                (StatusCode::BAD_REQUEST, "invalid_key")
            }
            WebError::Inventory(InventoryError::Gateway(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            WebError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            WebError::Malformed(status, _) => (*status, "invalid_request"),
        };

        let message = match self {
            WebError::Inventory(err) => err.to_string(),
            WebError::Validation(message) | WebError::Malformed(_, message) => message,
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });
        (status, body).into_response()
    }
}
