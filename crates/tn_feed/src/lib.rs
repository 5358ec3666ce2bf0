pub mod bindings;
pub mod config;
pub mod controller;
pub mod dom;
pub mod logging;
pub mod render;
pub mod source;

pub use bindings::FeedBindings;
pub use config::{FeedConfig, Placeholders};
pub use controller::{NewsFeedController, RefreshOutcome, RefreshTicket};
pub use dom::{Fragment, InputHandle, Page, Region, RegionHandle};
pub use logging::{init_logging, Logger};
pub use source::HttpNewsSource;

/// Build a page with the three elements the feed expects.
pub fn standard_page(config: &FeedConfig, input_value: &str) -> Page {
    let mut page = Page::new();
    page.add_region(config.grid_id.as_str());
    page.add_button(config.load_more_id.as_str());
    page.add_input(config.input_id.as_str(), input_value);
    page
}

pub mod prelude {
    pub use tn_core::{Article, Error, NewsSource, Result};
    pub use crate::{FeedBindings, FeedConfig, NewsFeedController, RefreshOutcome};
}
