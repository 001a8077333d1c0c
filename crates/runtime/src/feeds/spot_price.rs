use async_trait::async_trait;

use crate::sources::{SourceError, SpotPriceSource};

/// Dollar amount quoted to the conversion endpoint. The endpoint answers with
/// how much coin this buys, so the spot price is `QUOTE_USD / answer`.
pub const QUOTE_USD: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSpotPriceError {
    InvalidNumber,
    NonPositiveAmount,
}

pub fn parse_tobtc_body(body: &str) -> Result<f64, ParseSpotPriceError> {
    let coin_for_quote = body
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseSpotPriceError::InvalidNumber)?;

    if !coin_for_quote.is_finite() || coin_for_quote <= 0.0 {
        return Err(ParseSpotPriceError::NonPositiveAmount);
    }

    Ok(QUOTE_USD / coin_for_quote)
}

#[derive(Debug, Clone)]
pub struct HttpSpotPriceClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSpotPriceClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SpotPriceSource for HttpSpotPriceClient {
    async fn spot_price(&self) -> Result<f64, SourceError> {
        let request_error = |source| SourceError::Request {
            url: self.url.clone(),
            source,
        };

        let body = self
            .client
            .get(&self.url)
            .query(&[("currency", "USD"), ("value", "500")])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .text()
            .await
            .map_err(request_error)?;

        let price = parse_tobtc_body(&body).map_err(|err| SourceError::InvalidResponse {
            url: self.url.clone(),
            reason: format!("{err:?}: {body:?}"),
        })?;
        tracing::debug!(price, "fetched spot price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tobtc_body, ParseSpotPriceError};

    #[test]
    fn converts_coin_per_quote_into_spot_price() {
        assert_eq!(parse_tobtc_body("0.0125").unwrap(), 40_000.0);
        assert_eq!(parse_tobtc_body(" 0.025\n").unwrap(), 20_000.0);
    }

    #[test]
    fn rejects_non_numeric_body() {
        assert_eq!(
            parse_tobtc_body("<html>rate limited</html>"),
            Err(ParseSpotPriceError::InvalidNumber)
        );
    }

    #[test]
    fn rejects_zero_amount() {
        assert_eq!(
            parse_tobtc_body("0"),
            Err(ParseSpotPriceError::NonPositiveAmount)
        );
    }
}
