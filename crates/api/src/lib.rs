pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use runtime::ScenarioSources;

pub fn app(sources: ScenarioSources) -> Router {
    routes::router(state::AppState::new(sources))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use economics::{PricePoint, PriceSeries};
    use runtime::{
        FixedClock, PoolAccountSource, PriceSeriesSource, ScenarioSources, SourceError,
        SpotPriceSource,
    };
    use serde_json::{json, Value};
    use time::macros::datetime;
    use tower::ServiceExt;

    use crate::app;

    const JAN_1_2022: i64 = 1_640_995_200;
    const DAY: i64 = 86_400;

    struct Spot(Option<f64>);

    #[async_trait]
    impl SpotPriceSource for Spot {
        async fn spot_price(&self) -> Result<f64, SourceError> {
            self.0.ok_or_else(|| SourceError::InvalidResponse {
                url: "test://spot".to_owned(),
                reason: "offline".to_owned(),
            })
        }
    }

    struct Pool;

    #[async_trait]
    impl PoolAccountSource for Pool {
        async fn mined_total(&self, token: &str) -> Result<f64, SourceError> {
            match token {
                "good-token" => Ok(4.0),
                _ => Err(SourceError::InvalidResponse {
                    url: "test://pool".to_owned(),
                    reason: "unauthorized".to_owned(),
                }),
            }
        }
    }

    struct Prices;

    #[async_trait]
    impl PriceSeriesSource for Prices {
        async fn price_series(&self) -> Result<PriceSeries, SourceError> {
            let points = [100.0, 200.0, 50.0, 100.0]
                .into_iter()
                .enumerate()
                .map(|(i, price)| PricePoint::new(JAN_1_2022 + i as i64 * DAY, price))
                .collect();
            Ok(PriceSeries::new(points).unwrap())
        }
    }

    fn test_app(spot: Option<f64>) -> Router {
        app(ScenarioSources {
            spot: Arc::new(Spot(spot)),
            pool: Arc::new(Pool),
            prices: Arc::new(Prices),
            clock: Arc::new(FixedClock(datetime!(2022-01-05 0:00 UTC))),
        })
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn scenario() -> Value {
        json!({
            "startDate": "01/01/2022",
            "fixedCosts": 400,
            "electricCosts": 600,
            "bitcoinMined": 8
        })
    }

    #[tokio::test]
    async fn stats_returns_economics_and_ranking_without_curves_by_default() {
        let (status, body) = post(test_app(Some(40_000.0)), "/stats", scenario()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["economics"]["daysElapsed"], json!(4.0));
        assert_eq!(body["economics"]["totalCost"], json!(1000.0));
        assert_eq!(body["strategies"]["americanHodl"]["finalTotal"], json!(10.0));
        assert_eq!(body["strategies"]["americanHodl"]["cumulative"], json!([]));
        assert_eq!(body["rankings"][0]["strategy"], "Daily-DCA");
        assert_eq!(body["rankings"][2]["strategy"], "AmericanHodl");
    }

    #[tokio::test]
    async fn stats_includes_curves_when_requested() {
        let mut request = scenario();
        request["showStrategyData"] = json!(true);

        let (status, body) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["strategies"]["dailyDca"]["cumulative"],
            json!([2.5, 3.75, 8.75, 11.25])
        );
    }

    #[tokio::test]
    async fn stats_reads_mined_total_from_pool_token() {
        let request = json!({
            "startDate": "01/01/2022",
            "fixedCosts": 400,
            "electricCosts": 600,
            "bitcoinMined": 8,
            "slushToken": "good-token"
        });

        let (status, body) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["economics"]["coinMined"], json!(4.0));
    }

    #[tokio::test]
    async fn stats_rejects_request_without_mined_source() {
        let request = json!({ "startDate": "01/01/2022", "fixedCosts": 400 });

        let (status, body) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("mined amount"));
    }

    #[tokio::test]
    async fn stats_rejects_malformed_start_date() {
        let mut request = scenario();
        request["startDate"] = json!("2022-01-01");

        let (status, body) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn stats_rejects_non_json_body() {
        let response = test_app(Some(40_000.0))
            .oneshot(
                Request::post("/stats")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn start_date_without_price_data_is_unprocessable() {
        let mut request = scenario();
        request["startDate"] = json!("12/01/2021");

        let (status, _) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn zero_mined_total_is_unprocessable() {
        let mut request = scenario();
        request["bitcoinMined"] = json!(0);

        let (status, body) = post(test_app(Some(40_000.0)), "/stats", request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("division by zero"));
    }

    #[tokio::test]
    async fn spot_price_outage_is_a_bad_gateway() {
        let (status, _) = post(test_app(None), "/stats", scenario()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn chart_describes_all_four_series() {
        let (status, body) = post(test_app(Some(40_000.0)), "/chart", scenario()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Bitcoin Acquired Over Time");
        assert_eq!(body["yLabel"], "Bitcoin");
        assert_eq!(body["series"].as_array().unwrap().len(), 4);
        assert_eq!(body["series"][3]["label"], "Mined");
        assert_eq!(body["series"][3]["values"], json!([8.0, 8.0, 8.0, 8.0]));
    }

    #[tokio::test]
    async fn chart_can_hide_the_coin_axis() {
        let mut request = scenario();
        request["hideBitcoinOnGraph"] = json!(true);

        let (status, body) = post(test_app(Some(40_000.0)), "/chart", request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["yLabel"], "");
        assert_eq!(body["hideYTicks"], json!(true));
        assert_ne!(body["series"][3]["values"], json!([8.0, 8.0, 8.0, 8.0]));
        assert_eq!(body["series"][1]["values"][3], json!(1.0));
    }
}
