//! Catalog wire models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Article data as returned by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetails {
    pub article_number: String,
    pub description: String,
    pub normal_price: Decimal,
}

/// A search hit decorated with its thumbnail URL.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    #[serde(flatten)]
    pub details: ArticleDetails,
    pub image_url: String,
}

/// Builds thumbnail URLs from article numbers.
///
/// The URL is a pure template over the catalog host; it is never fetched
/// or validated.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    catalog_host: String,
}

impl ImageUrls {
    pub fn new(catalog_host: impl Into<String>) -> Self {
        Self {
            catalog_host: catalog_host.into(),
        }
    }

    /// `https://<catalog-host>/images/articles/120px/<articleNumber>.jpg`
    pub fn for_article(&self, article_number: &str) -> String {
        format!(
            "https://{}/images/articles/120px/{}.jpg",
            self.catalog_host, article_number
        )
    }

    pub fn summarize(&self, details: ArticleDetails) -> ArticleSummary {
        let image_url = self.for_article(&details.article_number);
        ArticleSummary { details, image_url }
    }
}
