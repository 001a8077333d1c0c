use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use economics::PowerProfile;
use runtime::{
    logging::TracingRunLogWriter,
    request::{DEFAULT_KWH_PRICE, DEFAULT_UPTIME_PERCENT, DEFAULT_WATTS},
    ChartData, MinedSource, ScenarioError, ScenarioReport, ScenarioRequest,
};
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stats", post(stats))
        .route("/chart", post(chart))
        .with_state(state)
}

fn default_kwh_price() -> f64 {
    DEFAULT_KWH_PRICE
}

fn default_watts() -> f64 {
    DEFAULT_WATTS
}

fn default_uptime_percent() -> f64 {
    DEFAULT_UPTIME_PERCENT
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBody {
    pub start_date: String,
    #[serde(default = "default_kwh_price")]
    pub kwh_price: f64,
    #[serde(default = "default_watts")]
    pub watts: f64,
    #[serde(default = "default_uptime_percent")]
    pub uptime_percent: f64,
    #[serde(default)]
    pub fixed_costs: f64,
    #[serde(default)]
    pub electric_costs: Option<f64>,
    #[serde(default)]
    pub bitcoin_mined: Option<f64>,
    #[serde(default)]
    pub slush_token: Option<String>,
}

impl ScenarioBody {
    fn into_request(self) -> Result<ScenarioRequest, ScenarioError> {
        Ok(ScenarioRequest {
            start_date: self.start_date,
            power: PowerProfile {
                kwh_price: self.kwh_price,
                watts: self.watts,
                uptime_percent: self.uptime_percent,
            },
            fixed_costs: self.fixed_costs,
            electric_costs: self.electric_costs,
            mined: MinedSource::from_parts(self.slush_token, self.bitcoin_mined)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    #[serde(flatten)]
    pub scenario: ScenarioBody,
    #[serde(default)]
    pub show_strategy_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBody {
    #[serde(flatten)]
    pub scenario: ScenarioBody,
    #[serde(default)]
    pub hide_bitcoin_on_graph: bool,
}

async fn run_scenario(state: &AppState, body: ScenarioBody) -> Result<ScenarioReport, ApiError> {
    let request = body.into_request()?;
    let report = state
        .engine()
        .run(&request, &mut TracingRunLogWriter)
        .await?;
    tracing::info!(
        start_date = %request.start_date,
        days = report.window.num_days(),
        "scenario evaluated"
    );
    Ok(report)
}

async fn stats(
    State(state): State<AppState>,
    body: Result<Json<StatsBody>, JsonRejection>,
) -> Result<Json<ScenarioReport>, ApiError> {
    let Json(body) = body?;
    let report = run_scenario(&state, body.scenario).await?;

    Ok(Json(if body.show_strategy_data {
        report
    } else {
        report.without_curves()
    }))
}

async fn chart(
    State(state): State<AppState>,
    body: Result<Json<ChartBody>, JsonRejection>,
) -> Result<Json<ChartData>, ApiError> {
    let Json(body) = body?;
    let report = run_scenario(&state, body.scenario).await?;

    Ok(Json(ChartData::from_report(
        &report,
        body.hide_bitcoin_on_graph,
    )))
}
