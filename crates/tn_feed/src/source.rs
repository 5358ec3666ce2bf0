use async_trait::async_trait;
use reqwest::Client;
use tn_core::{decode_payload, Article, Error, NewsSource, Result};
use url::Url;

use crate::config::FeedConfig;

/// Reads articles from the backend's news endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNewsSource {
    client: Client,
    endpoint: Url,
}

impl HttpNewsSource {
    pub fn new(base_url: &str, endpoint_path: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url, endpoint_path)
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.endpoint_path)
    }

    pub fn with_client(client: Client, base_url: &str, endpoint_path: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let endpoint = base
            .join(endpoint_path)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", endpoint_path, e)))?;
        Ok(Self { client, endpoint })
    }

    /// The request URL for a ticker, with `stock` percent-encoded.
    pub fn endpoint_for(&self, ticker: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("stock", ticker);
        url
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn fetch_news(&self, ticker: &str) -> Result<Vec<Article>> {
        let url = self.endpoint_for(ticker);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The body is still decoded; a JSON error page is not a failure by itself.
            tracing::warn!("News endpoint answered {} for {}", status, ticker);
        }

        let body = response.bytes().await?;
        decode_payload(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
