use std::sync::Arc;

use axum::{routing::get, Router};
use runtime::{
    feeds::{HttpPoolAccountClient, HttpSpotPriceClient, JsonPriceFile},
    ScenarioSources, SystemClock,
};

use crate::config::Config;

const USER_AGENT: &str = concat!("mining-roi/", env!("CARGO_PKG_VERSION"));

pub fn build_sources(config: &Config) -> Result<ScenarioSources, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(USER_AGENT)
        .build()?;

    Ok(ScenarioSources {
        spot: Arc::new(HttpSpotPriceClient::new(
            client.clone(),
            config.spot_price_url.clone(),
        )),
        pool: Arc::new(HttpPoolAccountClient::new(
            client,
            config.pool_account_url.clone(),
        )),
        prices: Arc::new(JsonPriceFile::new(&config.price_data_path)),
        clock: Arc::new(SystemClock),
    })
}

pub fn build_app(sources: ScenarioSources) -> Router {
    api::app(sources).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}
