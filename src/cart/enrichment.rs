//! Cart enrichment.
//!
//! Turns stored cart lines into display lines by looking each article up in
//! the catalog. A failed lookup never fails the read: the line is kept with
//! an empty description and zero price.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::models::{Cart, CartDisplay, CartLine, CartLineDisplay};
use super::store::CartStore;
use crate::catalog::{ArticleDetails, CatalogError, CatalogLookup, ImageUrls};

/// Default cap on in-flight catalog lookups per cart read.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Outcome of one per-line lookup.
enum LineResolution {
    Resolved(ArticleDetails),
    Degraded(CatalogError),
}

/// Merges cart lines with live catalog data.
#[derive(Clone)]
pub struct CartEnrichmentService {
    catalog: Arc<dyn CatalogLookup>,
    images: ImageUrls,
    max_concurrent_lookups: usize,
}

impl CartEnrichmentService {
    pub fn new(catalog: Arc<dyn CatalogLookup>, images: ImageUrls) -> Self {
        Self {
            catalog,
            images,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    /// Caps parallel lookups. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    /// Builds the display cart.
    ///
    /// Lookups run concurrently up to the configured limit; output keeps the
    /// cart's line order whatever order the lookups finish in.
    pub async fn enrich(&self, cart: &Cart) -> CartDisplay {
        let positions: Vec<CartLineDisplay> = stream::iter(cart.positions.iter().cloned())
            .map(|line| async move {
                let resolution = self.resolve(&line.article_number).await;
                self.display_line(&line, resolution)
            })
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await;

        let total_positions = positions.iter().map(|p| u64::from(p.quantity)).sum();

        CartDisplay {
            positions,
            total_positions,
        }
    }

    /// Reads the user's cart from `store` and enriches it.
    pub async fn enrich_user(&self, store: &CartStore, username: &str) -> CartDisplay {
        let cart = store.get(username);
        debug!(username, lines = cart.positions.len(), "enriching cart");
        self.enrich(&cart).await
    }

    async fn resolve(&self, article_number: &str) -> LineResolution {
        match self.catalog.fetch_article_details(article_number).await {
            Ok(details) => LineResolution::Resolved(details),
            Err(error) => LineResolution::Degraded(error),
        }
    }

    fn display_line(&self, line: &CartLine, resolution: LineResolution) -> CartLineDisplay {
        let image_url = self.images.for_article(&line.article_number);

        match resolution {
            LineResolution::Resolved(details) => CartLineDisplay {
                article_number: line.article_number.clone(),
                quantity: line.quantity,
                description: details.description,
                price: details.normal_price,
                image_url,
            },
            LineResolution::Degraded(error) => {
                warn!(
                    article_number = %line.article_number,
                    error = %error,
                    "catalog lookup failed, showing line without details"
                );
                CartLineDisplay {
                    article_number: line.article_number.clone(),
                    quantity: line.quantity,
                    description: String::new(),
                    price: Decimal::ZERO,
                    image_url,
                }
            }
        }
    }
}
