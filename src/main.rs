use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use microblog_timeline::config::Config;
use microblog_timeline::render::{HtmlRenderer, Renderer};
use microblog_timeline::resolve::{Endpoints, FallbackResolver};
use microblog_timeline::source::SourceFetcher;
use microblog_timeline::timeline::{load_stats, load_timeline};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting microblog-timeline");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        api_base = %config.api_base,
        snapshot_base = %config.snapshot_base,
        "Configuration loaded"
    );

    let fetcher = SourceFetcher::new(config.request_timeout);
    let resolver = FallbackResolver::new(fetcher);
    let endpoints = Endpoints::new(&config);

    // The two pipelines are independent and update disjoint page regions;
    // neither waits on or can abort the other.
    let (stats, timeline) = tokio::join!(
        load_stats(&resolver, &endpoints),
        load_timeline(&resolver, &endpoints),
    );

    let page = HtmlRenderer::new().page(&stats, &timeline);

    match &config.output_path {
        Some(path) => {
            tokio::fs::write(path, &page)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = page.len(), "Timeline page written");
        }
        None => println!("{page}"),
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,microblog_timeline=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
