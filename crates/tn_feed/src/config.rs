pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT: &str = "/api/news";
pub const DEFAULT_TICKER: &str = "AAPL";

pub const GRID_ID: &str = "newsGrid";
pub const LOAD_MORE_ID: &str = "loadMore";
pub const STOCK_INPUT_ID: &str = "stock-input";

/// Fallback content used when an article or a response is missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub thumbnail: String,
    pub summary: String,
    pub empty_message: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            thumbnail: "default.jpg".to_string(),
            summary: "No summary available.".to_string(),
            empty_message: "No news available.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub grid_id: String,
    pub load_more_id: String,
    pub input_id: String,
    pub default_ticker: String,
    pub placeholders: Placeholders,
    /// Drop responses of refreshes that were overtaken by a newer one.
    pub discard_superseded: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT.to_string(),
            grid_id: GRID_ID.to_string(),
            load_more_id: LOAD_MORE_ID.to_string(),
            input_id: STOCK_INPUT_ID.to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            placeholders: Placeholders::default(),
            discard_superseded: false,
        }
    }
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_endpoint(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn with_default_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.default_ticker = ticker.into();
        self
    }

    pub fn with_element_ids(
        mut self,
        grid: impl Into<String>,
        load_more: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        self.grid_id = grid.into();
        self.load_more_id = load_more.into();
        self.input_id = input.into();
        self
    }

    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn with_discard_superseded(mut self, discard: bool) -> Self {
        self.discard_superseded = discard;
        self
    }
}
