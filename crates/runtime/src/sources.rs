use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use economics::{PriceSeries, SeriesError};
use time::OffsetDateTime;

use crate::feeds::ParsePriceFileError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
    #[error("failed to read price data {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write price data {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("price data {} is malformed: {error:?}", .path.display())]
    Malformed {
        path: PathBuf,
        error: ParsePriceFileError,
    },
    #[error("price data {} is inconsistent: {source}", .path.display())]
    InvalidSeries {
        path: PathBuf,
        #[source]
        source: SeriesError,
    },
}

impl SourceError {
    /// Failures of a remote service, as opposed to local price data.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::InvalidResponse { .. })
    }
}

#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    async fn spot_price(&self) -> Result<f64, SourceError>;
}

/// Lifetime mining reward of a pool account, in whole coin.
#[async_trait]
pub trait PoolAccountSource: Send + Sync {
    async fn mined_total(&self, token: &str) -> Result<f64, SourceError>;
}

#[async_trait]
pub trait PriceSeriesSource: Send + Sync {
    async fn price_series(&self) -> Result<PriceSeries, SourceError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[derive(Clone)]
pub struct ScenarioSources {
    pub spot: Arc<dyn SpotPriceSource>,
    pub pool: Arc<dyn PoolAccountSource>,
    pub prices: Arc<dyn PriceSeriesSource>,
    pub clock: Arc<dyn Clock>,
}

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use economics::{PricePoint, PriceSeries};
    use time::OffsetDateTime;

    use super::{
        FixedClock, PoolAccountSource, PriceSeriesSource, ScenarioSources, SourceError,
        SpotPriceSource,
    };

    pub const JAN_1_2022: i64 = 1_640_995_200;
    pub const DAY: i64 = 86_400;

    pub struct StubSpot(pub Option<f64>);

    #[async_trait]
    impl SpotPriceSource for StubSpot {
        async fn spot_price(&self) -> Result<f64, SourceError> {
            self.0.ok_or_else(|| SourceError::InvalidResponse {
                url: "stub://spot".to_owned(),
                reason: "unavailable".to_owned(),
            })
        }
    }

    #[derive(Default)]
    pub struct StubPool {
        pub total: f64,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl PoolAccountSource for StubPool {
        async fn mined_total(&self, _token: &str) -> Result<f64, SourceError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.total)
        }
    }

    pub struct StubPrices(pub Vec<f64>);

    #[async_trait]
    impl PriceSeriesSource for StubPrices {
        async fn price_series(&self) -> Result<PriceSeries, SourceError> {
            let points = self
                .0
                .iter()
                .enumerate()
                .map(|(i, price)| PricePoint::new(JAN_1_2022 + i as i64 * DAY, *price))
                .collect();
            Ok(PriceSeries::new(points).expect("stub prices are valid"))
        }
    }

    pub fn sources(prices: &[f64], spot: Option<f64>, now: OffsetDateTime) -> ScenarioSources {
        ScenarioSources {
            spot: Arc::new(StubSpot(spot)),
            pool: Arc::new(StubPool {
                total: 8.0,
                ..StubPool::default()
            }),
            prices: Arc::new(StubPrices(prices.to_vec())),
            clock: Arc::new(FixedClock(now)),
        }
    }
}
