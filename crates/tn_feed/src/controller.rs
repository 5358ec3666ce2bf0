use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tn_core::{NewsSource, Result};

use crate::config::FeedConfig;
use crate::dom::RegionHandle;
use crate::logging::Logger;
use crate::render::{render_card, render_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This many cards were added to the region.
    Rendered(usize),
    /// The backend had nothing; the region shows the empty message.
    Empty,
    /// A newer refresh started while this one was waiting; nothing was touched.
    Superseded,
}

/// Position of a refresh in trigger order.
///
/// Issued when the trigger fires, not when the request goes out, so spawned
/// refreshes are ordered by click rather than by scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Fetches the news for a ticker and renders it into a region.
pub struct NewsFeedController {
    source: Arc<dyn NewsSource>,
    config: FeedConfig,
    generation: AtomicU64,
}

impl NewsFeedController {
    pub fn new(source: Arc<dyn NewsSource>, config: FeedConfig) -> Self {
        Self {
            source,
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn logger(&self, ticker: &str) -> Logger {
        Logger::new()
            .with_prefix(self.config.grid_id.as_str())
            .with_prefix(ticker)
    }

    /// Take the next ticket; any refresh holding an older one is now stale.
    pub fn issue_ticket(&self) -> RefreshTicket {
        RefreshTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_latest(&self, ticket: RefreshTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Refresh `region` with the articles for `ticker`.
    ///
    /// Failures are logged and swallowed; the region keeps whatever it
    /// showed before the call.
    pub async fn refresh(&self, region: &RegionHandle, ticker: &str, append: bool) {
        let ticket = self.issue_ticket();
        self.refresh_with(ticket, region, ticker, append).await;
    }

    pub async fn refresh_with(
        &self,
        ticket: RefreshTicket,
        region: &RegionHandle,
        ticker: &str,
        append: bool,
    ) {
        if let Err(e) = self.try_refresh_with(ticket, region, ticker, append).await {
            self.logger(ticker)
                .error(&format!("Error fetching news: {}", e));
        }
    }

    pub async fn try_refresh(
        &self,
        region: &RegionHandle,
        ticker: &str,
        append: bool,
    ) -> Result<RefreshOutcome> {
        let ticket = self.issue_ticket();
        self.try_refresh_with(ticket, region, ticker, append).await
    }

    pub async fn try_refresh_with(
        &self,
        ticket: RefreshTicket,
        region: &RegionHandle,
        ticker: &str,
        append: bool,
    ) -> Result<RefreshOutcome> {
        let logger = self.logger(ticker);
        logger.debug(&format!(
            "Fetching from {} (append: {}, ticket: {})",
            self.source.describe(),
            append,
            ticket.0
        ));

        let articles = self.source.fetch_news(ticker).await?;

        if self.config.discard_superseded && !self.is_latest(ticket) {
            logger.debug(&format!("Dropping superseded response (ticket: {})", ticket.0));
            return Ok(RefreshOutcome::Superseded);
        }

        let placeholders = &self.config.placeholders;
        if articles.is_empty() {
            let message = render_empty(placeholders)?;
            region.write().await.replace_with(message);
            logger.info("No news available");
            return Ok(RefreshOutcome::Empty);
        }

        let cards = articles
            .iter()
            .map(|article| render_card(article, placeholders))
            .collect::<Result<Vec<_>>>()?;

        let mut region = region.write().await;
        if !append {
            region.clear();
        }
        for card in cards {
            region.append(card);
        }
        logger.info(&format!("Rendered {} articles", articles.len()));
        Ok(RefreshOutcome::Rendered(articles.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tn_core::{Article, Error};
    use tokio::sync::Mutex;
    use crate::dom::{Fragment, Region};
    use scraper::{Html, Selector};

    struct StaticSource {
        articles: Vec<Article>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticSource {
        fn new(articles: Vec<Article>) -> Arc<Self> {
            Arc::new(Self {
                articles,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl NewsSource for StaticSource {
        async fn fetch_news(&self, ticker: &str) -> Result<Vec<Article>> {
            self.requests.lock().await.push(ticker.to_string());
            Ok(self.articles.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl NewsSource for FailingSource {
        async fn fetch_news(&self, _ticker: &str) -> Result<Vec<Article>> {
            Err(Error::Payload("connection refused".to_string()))
        }
    }

    fn articles(titles: &[&str]) -> Vec<Article> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Article::new(*t, format!("https://x/{}", i)))
            .collect()
    }

    fn titles(region: &Region) -> Vec<String> {
        let html = Html::parse_fragment(&region.to_html());
        let selector = Selector::parse("div.card h5.card-title").unwrap();
        html.select(&selector).map(|e| e.text().collect()).collect()
    }

    fn existing() -> Fragment {
        render_card(&Article::new("old", "https://x/old"), &FeedConfig::default().placeholders).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_renders_one_card_per_article_in_order() {
        let source = StaticSource::new(articles(&["one", "two", "three"]));
        let controller = NewsFeedController::new(source.clone(), FeedConfig::default());
        let region = RegionHandle::new();

        let outcome = controller.try_refresh(&region, "AAPL", false).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Rendered(3));
        assert_eq!(titles(&*region.read().await), vec!["one", "two", "three"]);
        assert_eq!(*source.requests.lock().await, vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_replace_mode_clears_existing_children() {
        let controller = NewsFeedController::new(StaticSource::new(articles(&["new"])), FeedConfig::default());
        let region = RegionHandle::with_children(vec![existing(), existing()]);

        controller.refresh(&region, "AAPL", false).await;

        assert_eq!(titles(&*region.read().await), vec!["new"]);
    }

    #[tokio::test]
    async fn test_append_mode_keeps_existing_children() {
        let controller = NewsFeedController::new(StaticSource::new(articles(&["a", "b"])), FeedConfig::default());
        let region = RegionHandle::with_children(vec![existing()]);

        controller.refresh(&region, "AAPL", true).await;

        assert_eq!(titles(&*region.read().await), vec!["old", "a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_response_shows_single_message_even_when_appending() {
        for append in [false, true] {
            let controller = NewsFeedController::new(StaticSource::new(vec![]), FeedConfig::default());
            let region = RegionHandle::with_children(vec![existing(), existing()]);

            let outcome = controller.try_refresh(&region, "AAPL", append).await.unwrap();

            assert_eq!(outcome, RefreshOutcome::Empty);
            let region = region.read().await;
            assert_eq!(region.len(), 1);
            assert_eq!(region.to_html().trim(), "<p>No news available.</p>");
        }
    }

    #[tokio::test]
    async fn test_failure_is_swallowed_and_region_untouched() {
        for append in [false, true] {
            let controller = NewsFeedController::new(Arc::new(FailingSource), FeedConfig::default());
            let region = RegionHandle::with_children(vec![existing()]);
            let before = region.snapshot().await;

            controller.refresh(&region, "AAPL", append).await;

            assert_eq!(region.snapshot().await, before);
        }
    }

    #[tokio::test]
    async fn test_try_refresh_reports_the_error() {
        let controller = NewsFeedController::new(Arc::new(FailingSource), FeedConfig::default());
        let result = controller.try_refresh(&RegionHandle::new(), "AAPL", false).await;
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[tokio::test]
    async fn test_tickets_follow_issue_order() {
        let controller = NewsFeedController::new(StaticSource::new(vec![]), FeedConfig::default());
        let first = controller.issue_ticket();
        let second = controller.issue_ticket();
        assert!(first < second);
        assert!(!controller.is_latest(first));
        assert!(controller.is_latest(second));
    }

    #[tokio::test]
    async fn test_stale_ticket_is_discarded_when_enabled() {
        let config = FeedConfig::default().with_discard_superseded(true);
        let controller = NewsFeedController::new(StaticSource::new(articles(&["late"])), config);
        let region = RegionHandle::with_children(vec![existing()]);

        let stale = controller.issue_ticket();
        let _newer = controller.issue_ticket();
        let outcome = controller.try_refresh_with(stale, &region, "AAPL", false).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Superseded);
        assert_eq!(titles(&*region.read().await), vec!["old"]);
    }
}
