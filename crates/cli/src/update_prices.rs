use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Args;
use economics::PriceSeries;
use runtime::{
    feeds::{HttpMessariClient, JsonPriceFile},
    PriceSeriesSource,
};
use time::{Date, OffsetDateTime};

#[derive(Args, Debug, Clone)]
pub struct UpdatePricesArgs {
    #[arg(long)]
    pub messari_api_key: String,
    #[arg(long, default_value = "PriceDataKraken.json")]
    pub price_data: PathBuf,
    #[arg(
        long,
        default_value = "https://data.messari.io/api/v1/markets/kraken-btc-usd/metrics/price/time-series"
    )]
    pub messari_url: String,
    #[arg(long, default_value_t = 600)]
    pub http_timeout_secs: u64,
}

/// Days to request: from the file's last day (already stored, filtered out on
/// append) through `today`.
pub fn request_range(series: &PriceSeries, today: Date) -> anyhow::Result<(Date, Date)> {
    let last = series
        .last()
        .context("price file has no rows to extend")?;
    let start = OffsetDateTime::from_unix_timestamp(last.timestamp)
        .with_context(|| format!("last timestamp {} is out of range", last.timestamp))?
        .date();
    Ok((start, today.max(start)))
}

pub async fn run(args: UpdatePricesArgs) -> anyhow::Result<()> {
    let file = JsonPriceFile::new(&args.price_data);
    let series = file
        .price_series()
        .await
        .with_context(|| format!("failed to load {}", args.price_data.display()))?;
    let (start, end) = request_range(&series, OffsetDateTime::now_utc().date())?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.http_timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let candidates = HttpMessariClient::new(client, args.messari_url, args.messari_api_key)
        .daily_opens(start, end)
        .await?;

    let added = file
        .append_newer(&candidates)
        .await
        .with_context(|| format!("failed to update {}", args.price_data.display()))?;
    println!("added {added} new price points");
    Ok(())
}
