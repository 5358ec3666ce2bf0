use std::sync::Arc;
use tn_core::Error;
use tokio::task::JoinHandle;

use crate::controller::{NewsFeedController, RefreshTicket};
use crate::dom::{Page, RegionHandle};
use crate::logging::Logger;

/// Connects a page's elements to a controller.
///
/// The grid is resolved by id each time a trigger fires, so a page that loses
/// its grid logs a failed refresh instead of panicking.
pub struct FeedBindings {
    page: Page,
    controller: Arc<NewsFeedController>,
    load_more_wired: bool,
}

impl FeedBindings {
    pub fn bind(page: Page, controller: Arc<NewsFeedController>) -> Self {
        let load_more_wired = page.has_button(&controller.config().load_more_id);
        if !load_more_wired {
            tracing::debug!(
                "No #{} button on the page, load more is not wired",
                controller.config().load_more_id
            );
        }
        Self {
            page,
            controller,
            load_more_wired,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn controller(&self) -> &Arc<NewsFeedController> {
        &self.controller
    }

    pub fn load_more_wired(&self) -> bool {
        self.load_more_wired
    }

    /// Fired once when the page has loaded.
    pub async fn on_page_load(&self) {
        let ticket = self.controller.issue_ticket();
        self.refresh(ticket, &self.default_ticker(), false).await;
    }

    /// Fired by a click on the load more button. Returns whether a refresh ran.
    pub async fn on_load_more(&self) -> bool {
        if !self.load_more_wired {
            return false;
        }
        let ticker = self.requested_ticker().await;
        let ticket = self.controller.issue_ticket();
        self.refresh(ticket, &ticker, true).await;
        true
    }

    /// Page load without waiting for the response.
    pub fn spawn_page_load(self: &Arc<Self>) -> JoinHandle<()> {
        let ticket = self.controller.issue_ticket();
        let ticker = self.default_ticker();
        let bindings = Arc::clone(self);
        tokio::spawn(async move { bindings.refresh(ticket, &ticker, false).await })
    }

    /// A load more click without waiting for the response.
    ///
    /// The input is read and the ticket issued before returning, so a later
    /// click always supersedes this one.
    pub async fn spawn_load_more(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.load_more_wired {
            return None;
        }
        let ticker = self.requested_ticker().await;
        let ticket = self.controller.issue_ticket();
        let bindings = Arc::clone(self);
        Some(tokio::spawn(async move {
            bindings.refresh(ticket, &ticker, true).await
        }))
    }

    /// Current input value, or the default ticker when the field is blank or absent.
    pub async fn requested_ticker(&self) -> String {
        let value = match self.page.input(&self.controller.config().input_id) {
            Some(input) => input.value().await,
            None => String::new(),
        };
        let value = value.trim();
        if value.is_empty() {
            self.default_ticker()
        } else {
            value.to_string()
        }
    }

    fn default_ticker(&self) -> String {
        self.controller.config().default_ticker.clone()
    }

    async fn refresh(&self, ticket: RefreshTicket, ticker: &str, append: bool) {
        match self.grid() {
            Some(region) => {
                self.controller
                    .refresh_with(ticket, &region, ticker, append)
                    .await
            }
            None => {
                let grid_id = &self.controller.config().grid_id;
                Logger::new()
                    .with_prefix(grid_id.as_str())
                    .with_prefix(ticker)
                    .error(&format!(
                        "Error fetching news: {}",
                        Error::RegionNotFound(grid_id.clone())
                    ));
            }
        }
    }

    fn grid(&self) -> Option<RegionHandle> {
        self.page.region(&self.controller.config().grid_id)
    }
}
