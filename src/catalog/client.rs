//! HTTP client for the catalog service.
//!
//! Endpoints:
//! - `GET {api}/api/articles/{articleNumber}` returns one article
//! - `GET {api}/api/articles?search={term}` returns an array of articles

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::{ArticleDetails, CatalogError, CatalogLookup};
use crate::config::CatalogConfig;

/// `reqwest`-backed catalog client. Cheap to clone.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    api_base: Url,
}

impl HttpCatalogClient {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if the API URL cannot be used as a
    /// base, or `CatalogError::Http` if the TLS backend fails to initialize.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let api_base = Url::parse(&config.api_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {e}", config.api_url)))?;
        if api_base.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(config.api_url.clone()));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner { client, api_base }),
        })
    }

    fn articles_url(&self, article_number: Option<&str>) -> Result<Url, CatalogError> {
        let mut url = self.inner.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::InvalidUrl(self.inner.api_base.to_string()))?;
            segments.pop_if_empty().extend(["api", "articles"]);
            if let Some(article_number) = article_number {
                segments.push(article_number);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &str,
    ) -> Result<T, CatalogError> {
        debug!(%url, "Catalog request");

        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        // Read the body as text first so decode failures are reported as such.
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                resource,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                resource: resource.to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn fetch_article_details(
        &self,
        article_number: &str,
    ) -> Result<ArticleDetails, CatalogError> {
        let url = self.articles_url(Some(article_number))?;
        self.get_json(url, &format!("article {article_number}"))
            .await
    }

    #[instrument(skip(self))]
    async fn search_catalog(&self, term: &str) -> Result<Vec<ArticleDetails>, CatalogError> {
        let mut url = self.articles_url(None)?;
        url.query_pairs_mut().append_pair("search", term);
        self.get_json(url, &format!("search '{term}'")).await
    }
}
