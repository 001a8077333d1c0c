use economics::PricePoint;
use serde::Deserialize;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::sources::SourceError;

pub const MESSARI_API_KEY_HEADER: &str = "x-messari-api-key";

const QUERY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMessariError {
    InvalidJson,
    InvalidRow { index: usize },
}

#[derive(Debug, Deserialize)]
struct MessariBody {
    data: MessariData,
}

#[derive(Debug, Deserialize)]
struct MessariData {
    values: Option<Vec<Vec<Option<f64>>>>,
}

/// Daily opens from a `data.values` time series whose rows start with
/// `[timestamp_ms, open, ..]`. Timestamps are truncated to whole seconds.
pub fn parse_messari_body(bytes: &[u8]) -> Result<Vec<PricePoint>, ParseMessariError> {
    let body: MessariBody =
        serde_json::from_slice(bytes).map_err(|_| ParseMessariError::InvalidJson)?;

    body.data
        .values
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, row)| match row.as_slice() {
            [Some(millis), Some(open), ..] if millis.is_finite() && *millis >= 0.0 => {
                Ok(PricePoint::new(*millis as i64 / 1_000, *open))
            }
            _ => Err(ParseMessariError::InvalidRow { index }),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct HttpMessariClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpMessariClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn daily_opens(&self, start: Date, end: Date) -> Result<Vec<PricePoint>, SourceError> {
        let request_error = |source| SourceError::Request {
            url: self.url.clone(),
            source,
        };
        let start = start.format(QUERY_DATE_FORMAT).unwrap_or_default();
        let end = end.format(QUERY_DATE_FORMAT).unwrap_or_default();

        let body = self
            .client
            .get(&self.url)
            .header(MESSARI_API_KEY_HEADER, &self.api_key)
            .query(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("interval", "1d"),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .bytes()
            .await
            .map_err(request_error)?;

        let points = parse_messari_body(&body).map_err(|err| SourceError::InvalidResponse {
            url: self.url.clone(),
            reason: format!("{err:?}"),
        })?;
        tracing::debug!(%start, %end, rows = points.len(), "fetched daily opens");
        Ok(points)
    }
}
