//! Catalog source backed by the storefront products API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use super::CatalogSource;
use crate::catalog::{parse_catalog, CatalogDocument, CatalogError};
use crate::config::SourceConfig;

/// Fetches catalog documents over HTTP.
///
/// Requests look like the ones the web storefront makes, since the products
/// endpoint expects the storefront's routing headers.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    config: SourceConfig,
}

impl HttpCatalogSource {
    pub fn new(config: SourceConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;
        Ok(Self { client, config })
    }

    /// Products endpoint for the configured region.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/products/v2/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.region
        )
    }

    fn build_request(&self, query: Option<&str>) -> RequestBuilder {
        let collection = self.config.collection.as_str();
        let mut params = vec![("collection", collection)];
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            params.push(("q", q));
        }

        let storefront = self.config.storefront_url.trim_end_matches('/');
        let mut request = self
            .client
            .get(self.endpoint())
            .query(&params)
            .header("Accept", "*/*")
            .header("X-Client", "web-storefront")
            .header("X-Render-Context", "csr")
            .header("X-Page-Context", "plp")
            .header("X-Route", format!("/collections/{}", collection))
            .header("Origin", storefront)
            .header("Referer", format!("{}/", storefront));

        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.header("Authorization", key);
        }
        request
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, query: Option<&str>) -> Result<CatalogDocument, CatalogError> {
        debug!(
            "Fetching catalog from {} (collection={}, query={:?})",
            self.endpoint(),
            self.config.collection,
            query
        );

        let response = self.build_request(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Catalog source returned {}", status);
            return Err(CatalogError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let document = parse_catalog(&body)?;
        debug!("Fetched {} products", document.len());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(api_key: Option<&str>) -> HttpCatalogSource {
        HttpCatalogSource::new(SourceConfig {
            base_url: "https://api.example.com/".to_string(),
            api_key: api_key.map(str::to_string),
            ..SourceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_uses_region() {
        assert_eq!(
            source(None).endpoint(),
            "https://api.example.com/products/v2/uk"
        );
    }

    #[test]
    fn test_request_without_query() {
        let request = source(Some("secret")).build_request(None).build().unwrap();

        assert_eq!(request.url().query(), Some("collection=library"));
        assert_eq!(request.headers()["Authorization"], "secret");
        assert_eq!(request.headers()["X-Route"], "/collections/library");
        assert_eq!(request.headers()["X-Client"], "web-storefront");
    }

    #[test]
    fn test_request_with_query_is_encoded() {
        let request = source(None)
            .build_request(Some("three little pigs"))
            .build()
            .unwrap();

        assert_eq!(
            request.url().query(),
            Some("collection=library&q=three+little+pigs")
        );
        assert!(request.headers().get("Authorization").is_none());
    }
}
