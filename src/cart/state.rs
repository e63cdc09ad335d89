//! Shopping Cart State Management
//!
//! This module wires the cart store, the catalog client, enrichment and
//! order submission into the state shared by all request handlers.

use super::{enrichment::CartEnrichmentService, order::OrderDesk, store::CartStore};
use crate::catalog::{CatalogError, CatalogLookup, HttpCatalogClient, ImageUrls};
use crate::config::CatalogConfig;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Per-user carts. Cloning the store shares the same backend.
    pub carts: CartStore,

    /// Catalog-backed cart view.
    pub enrichment: CartEnrichmentService,

    /// Order submission over `carts`.
    pub orders: OrderDesk,

    /// Direct catalog access for search.
    pub catalog: Arc<dyn CatalogLookup>,

    pub images: ImageUrls,
}

impl AppState {
    /// Creates state backed by the HTTP catalog client.
    ///
    /// # Errors
    ///
    /// Fails if the catalog client cannot be built from `config`.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let catalog = Arc::new(HttpCatalogClient::new(config)?);
        tracing::info!(api_url = %config.api_url, "Catalog client ready");

        Ok(Self::with_catalog(
            catalog,
            ImageUrls::new(config.host.as_str()),
            config.max_concurrent_lookups,
        ))
    }

    /// Creates state over any catalog implementation and a fresh in-memory store.
    pub fn with_catalog(
        catalog: Arc<dyn CatalogLookup>,
        images: ImageUrls,
        max_concurrent_lookups: usize,
    ) -> Self {
        let carts = CartStore::new();
        let enrichment = CartEnrichmentService::new(catalog.clone(), images.clone())
            .with_max_concurrent_lookups(max_concurrent_lookups);
        let orders = OrderDesk::new(carts.clone());

        Self {
            carts,
            enrichment,
            orders,
            catalog,
            images,
        }
    }
}
