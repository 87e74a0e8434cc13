//! Catalog and category request handlers.
//!
//! Handlers only translate between HTTP and [`crate::core::CatalogService`]:
//! they pull raw parameters out of the request, call the service and map its
//! [`Error`] to a status code with a fixed, client-safe message.

use crate::{
    api::{
        AppState,
        response::{json_error, ok},
    },
    core::{NewCategory, ProductQuery},
    errors::Error,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Raw query parameters of `GET /catalog`, normalized by [`ProductQuery::from_params`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Page size
    pub limit: Option<String>,
    /// Rows to skip
    pub offset: Option<String>,
    /// Category code filter
    pub category: Option<String>,
    /// Exclusive base price ceiling
    #[serde(rename = "priceLessThan")]
    pub price_less_than: Option<String>,
}

/// Maps a service error onto a response.
///
/// Validation messages are shown to the client; anything else gets
/// `fallback` so storage details never leave the process.
fn error_response(err: &Error, fallback: &'static str) -> Response {
    match err {
        Error::Validation { message } => json_error(StatusCode::BAD_REQUEST, message.as_str()),
        Error::ProductNotFound { .. } => json_error(StatusCode::NOT_FOUND, "Product not found"),
        // Duplicate codes are not told apart from other storage failures yet
        Error::CategoryConflict { .. } | Error::Database(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
        other => {
            warn!("Unexpected error in request handler: {}", other);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}

/// `GET /catalog` - one page of products plus the total match count.
///
/// Malformed parameters never fail the request; they fall back to defaults.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let params = params.map(|Query(p)| p).unwrap_or_else(|e| {
        debug!("Ignoring unreadable query string: {}", e);
        ListParams::default()
    });

    let query = ProductQuery::from_params(
        params.limit.as_deref(),
        params.offset.as_deref(),
        params.category.as_deref(),
        params.price_less_than.as_deref(),
    );

    match state.catalog.list_products(&query).await {
        Ok(page) => ok(page),
        Err(e) => error_response(&e, "Could not fetch products"),
    }
}

/// `GET /catalog/{code}` - a single product with resolved variant prices.
pub async fn get_product(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match state.catalog.get_product_by_code(&code).await {
        Ok(product) => ok(product),
        Err(e) => error_response(&e, "Could not fetch product"),
    }
}

/// `GET /catalog/` - a by-code lookup with an empty code.
pub async fn get_product_without_code(state: State<AppState>) -> Response {
    get_product(state, Path(String::new())).await
}

/// `GET /categories` - every category.
pub async fn list_categories(State(state): State<AppState>) -> Response {
    match state.catalog.list_categories().await {
        Ok(categories) => ok(categories),
        Err(e) => error_response(&e, "Failed to fetch categories"),
    }
}

/// `POST /categories` - creates a category from `{"code", "name"}`.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
pub async fn create_category(State(state): State<AppState>, body: Bytes) -> Response {
    let request: NewCategory = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected category body: {}", e);
            return json_error(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match state.catalog.create_category(&request).await {
        Ok(category) => ok(category),
        Err(e) => error_response(&e, "Failed to create category"),
    }
}
