//! Product Catalog Module
//!
//! The catalog is an external service. This module contains:
//! - Wire models for article details
//! - The `CatalogLookup` port consumed by cart enrichment and search
//! - A `reqwest` implementation of that port
//! - The image URL convention used by the catalog's CDN

pub mod client;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpCatalogClient;
pub use models::{ArticleDetails, ArticleSummary, ImageUrls};

/// A failed catalog call.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, including client-side timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned {status} for {resource}")]
    Status {
        status: reqwest::StatusCode,
        resource: String,
    },

    #[error("Malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Read access to the remote catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetches description and price for a single article.
    async fn fetch_article_details(&self, article_number: &str)
        -> Result<ArticleDetails, CatalogError>;

    /// Free-text search over the catalog.
    async fn search_catalog(&self, term: &str) -> Result<Vec<ArticleDetails>, CatalogError>;
}
