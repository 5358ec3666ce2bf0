use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tn_feed::{standard_page, FeedBindings, FeedConfig, HttpNewsSource, NewsFeedController};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a ticker's news feed from a /api/news backend", long_about = None)]
struct Cli {
    #[arg(long, default_value = tn_feed::config::DEFAULT_BASE_URL)]
    backend_url: String,
    #[arg(long, default_value = tn_feed::config::DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(long, default_value = tn_feed::config::DEFAULT_TICKER)]
    default_ticker: String,
    /// Drop responses that arrive after a newer refresh was started
    #[arg(long)]
    discard_superseded: bool,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the page once and print the feed
    Load,
    /// Load the page, then press "load more" once per symbol
    More {
        /// Symbols typed into the input before each click; none means one click with an empty input
        symbols: Vec<String>,
    },
}

impl Cli {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig::new()
            .with_base_url(self.backend_url.as_str())
            .with_endpoint(self.endpoint.as_str())
            .with_default_ticker(self.default_ticker.as_str())
            .with_discard_superseded(self.discard_superseded)
    }
}

/// Fire the page load and every click without waiting in between, like
/// browser event handlers, then wait for all of them to settle.
async fn run_session(bindings: &Arc<FeedBindings>, command: &Commands) -> anyhow::Result<()> {
    let mut pending = vec![bindings.spawn_page_load()];

    if let Commands::More { symbols } = command {
        let input_id = bindings.controller().config().input_id.clone();
        let input = bindings
            .page()
            .input(&input_id)
            .context("Page has no ticker input")?;
        if symbols.is_empty() {
            pending.extend(bindings.spawn_load_more().await);
        }
        for symbol in symbols {
            input.set_value(symbol.as_str()).await;
            pending.extend(bindings.spawn_load_more().await);
        }
    }

    for handle in pending {
        handle.await.context("Refresh task panicked")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tn_feed::init_logging(level);

    let config = cli.feed_config();
    let source = HttpNewsSource::from_config(&config)
        .with_context(|| format!("Invalid backend location {}{}", config.base_url, config.endpoint_path))?;
    info!("📰 Using news endpoint {}", source.endpoint_for(&config.default_ticker));

    let page = standard_page(&config, "");
    let grid_id = config.grid_id.clone();
    let bindings = Arc::new(FeedBindings::bind(
        page,
        Arc::new(NewsFeedController::new(Arc::new(source), config)),
    ));

    run_session(&bindings, &cli.command).await?;

    let grid = bindings
        .page()
        .region(&grid_id)
        .context("Page has no news grid")?;
    let region = grid.snapshot().await;
    println!("{}", region.to_html());
    info!("🗞️  {} elements in #{}", region.len(), grid_id);

    Ok(())
}
