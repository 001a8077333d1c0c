mod config;
mod wiring;

use anyhow::Context;
use runtime::PriceSeriesSource;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use config::{Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let sources = wiring::build_sources(&config).context("failed to build HTTP client")?;
    let days = sources
        .prices
        .price_series()
        .await
        .context("price data must load before serving")?
        .len();
    tracing::info!(
        path = %config.price_data_path.display(),
        days,
        log_format = config.log_format.as_str(),
        "price data loaded"
    );

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "mining-roi server listening");

    axum::serve(listener, wiring::build_app(sources))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
