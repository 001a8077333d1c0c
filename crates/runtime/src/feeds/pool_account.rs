use async_trait::async_trait;
use serde::Deserialize;

use crate::sources::{PoolAccountSource, SourceError};

pub const AUTH_HEADER: &str = "SlushPool-Auth-Token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePoolProfileError {
    InvalidJson,
    InvalidAllTimeReward,
    InvalidUnconfirmedReward,
}

#[derive(Debug, Deserialize)]
struct PoolProfile {
    btc: BtcRewards,
}

#[derive(Debug, Deserialize)]
struct BtcRewards {
    all_time_reward: DecimalField,
    unconfirmed_reward: DecimalField,
}

/// Pool profiles report rewards as decimal strings; plain numbers are
/// accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DecimalField {
    Text(String),
    Number(f64),
}

impl DecimalField {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Number(value) => *value,
        };
        value.is_finite().then_some(value)
    }
}

pub fn parse_pool_profile(body: &str) -> Result<f64, ParsePoolProfileError> {
    let profile: PoolProfile =
        serde_json::from_str(body).map_err(|_| ParsePoolProfileError::InvalidJson)?;

    let all_time = profile
        .btc
        .all_time_reward
        .value()
        .ok_or(ParsePoolProfileError::InvalidAllTimeReward)?;
    let unconfirmed = profile
        .btc
        .unconfirmed_reward
        .value()
        .ok_or(ParsePoolProfileError::InvalidUnconfirmedReward)?;

    Ok(all_time + unconfirmed)
}

#[derive(Debug, Clone)]
pub struct HttpPoolAccountClient {
    client: reqwest::Client,
    url: String,
}

impl HttpPoolAccountClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PoolAccountSource for HttpPoolAccountClient {
    async fn mined_total(&self, token: &str) -> Result<f64, SourceError> {
        let request_error = |source| SourceError::Request {
            url: self.url.clone(),
            source,
        };

        let body = self
            .client
            .get(&self.url)
            .header(AUTH_HEADER, token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .text()
            .await
            .map_err(request_error)?;

        parse_pool_profile(&body).map_err(|err| SourceError::InvalidResponse {
            url: self.url.clone(),
            reason: format!("{err:?}"),
        })
    }
}
