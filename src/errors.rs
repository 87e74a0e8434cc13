//! Unified error types for the catalog service.
//!
//! Storage failures arrive as [`sea_orm::DbErr`] and are translated into this
//! taxonomy by the catalog service; the HTTP layer only ever matches on
//! [`Error`] variants.

use thiserror::Error;

/// Every failure the catalog service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (environment, seed file)
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Caller input rejected before any storage access
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason, safe to show to clients
        message: String,
    },

    /// No product matches the requested code
    #[error("Product not found: {code}")]
    ProductNotFound {
        /// The code that was looked up
        code: String,
    },

    /// A category with the same code already exists
    #[error("Category already exists: {code}")]
    CategoryConflict {
        /// The duplicated code
        code: String,
    },

    /// Any other failure reported by the persistence layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP listener or serving failure
    #[error("Server error: {message}")]
    Server {
        /// What went wrong
        message: String,
    },

    /// File or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
