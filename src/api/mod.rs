//! HTTP interface - routes, handlers and server lifecycle.
//!
//! | Route                  | Handler                              |
//! |------------------------|--------------------------------------|
//! | `GET /catalog`         | [`handlers::list_products`]          |
//! | `GET /catalog/{code}`  | [`handlers::get_product`]            |
//! | `GET /categories`      | [`handlers::list_categories`]        |
//! | `POST /categories`     | [`handlers::create_category`]        |

/// Request handlers for catalog and category endpoints
pub mod handlers;
/// JSON response helpers
pub mod response;
/// Listener setup and graceful shutdown
pub mod server;

use crate::core::CatalogService;
use axum::{Router, routing::get};

/// Shared data available to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Catalog operations backed by the configured repository
    pub catalog: CatalogService,
}

impl AppState {
    /// Creates handler state around a catalog service.
    #[must_use]
    pub const fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/catalog", get(handlers::list_products))
        // An empty code segment still reaches the handler so it can answer 400
        .route("/catalog/", get(handlers::get_product_without_code))
        .route("/catalog/:code", get(handlers::get_product))
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .with_state(state)
}
