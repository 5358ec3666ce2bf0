use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch the articles published for a ticker, in backend order
    async fn fetch_news(&self, ticker: &str) -> Result<Vec<Article>>;

    /// Short label used in log lines
    fn describe(&self) -> String {
        "news source".to_string()
    }
}
