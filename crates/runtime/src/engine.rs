//! Scenario pipeline.

use economics::{
    dates, evaluate_economics, EconomicsResult, ElectricCost, PriceWindow, ScenarioInput,
};
use serde::Serialize;
use strategy::{rank_strategies, Budget, StrategyOutcomes, StrategyRanking};
use time::OffsetDateTime;

use crate::{
    error::ScenarioError,
    logging::{RunLogEvent, RunLogEventKind, RunLogWriter},
    request::{MinedSource, ScenarioRequest},
    sources::{PoolAccountSource, ScenarioSources, SourceError},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSnapshot {
    pub input: ScenarioInput,
    pub spot_price: f64,
    pub window: PriceWindow,
    pub now: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub economics: EconomicsResult,
    pub strategies: StrategyOutcomes,
    pub rankings: Vec<StrategyRanking>,
    #[serde(skip)]
    pub window: PriceWindow,
}

impl ScenarioReport {
    pub fn without_curves(mut self) -> Self {
        self.strategies = self.strategies.without_curves();
        self
    }
}

async fn resolve_mined(
    mined: &MinedSource,
    pool: &dyn PoolAccountSource,
) -> Result<f64, SourceError> {
    match mined {
        MinedSource::Direct { amount } => Ok(*amount),
        MinedSource::PoolAccount { token } => pool.mined_total(token).await,
    }
}

pub async fn gather(
    request: &ScenarioRequest,
    sources: &ScenarioSources,
) -> Result<ScenarioSnapshot, ScenarioError> {
    let start_date = dates::parse_start_date(&request.start_date)?;

    let (series, spot_price, coin_mined) = tokio::try_join!(
        sources.prices.price_series(),
        sources.spot.spot_price(),
        resolve_mined(&request.mined, sources.pool.as_ref()),
    )
    .inspect_err(|err| tracing::warn!(error = %err, "scenario lookup failed"))?;

    let window = series.window_from(start_date)?;
    let electric_cost = request
        .electric_costs
        .map_or(ElectricCost::Derived, ElectricCost::Override);

    Ok(ScenarioSnapshot {
        input: ScenarioInput {
            start_date,
            power: request.power,
            fixed_costs: request.fixed_costs,
            electric_cost,
            coin_mined,
        },
        spot_price,
        window,
        now: sources.clock.now(),
    })
}

pub fn evaluate(
    snapshot: &ScenarioSnapshot,
    run_log_writer: &mut dyn RunLogWriter,
) -> Result<ScenarioReport, ScenarioError> {
    let economics = evaluate_economics(&snapshot.input, snapshot.spot_price, snapshot.now)?;
    run_log_writer.write(RunLogEvent::new(
        RunLogEventKind::EconomicsComputed,
        format!(
            "paid_off={:.2}% breakeven_price={:.2}",
            economics.percent_paid_off, economics.breakeven_price
        ),
    ));

    let budget = Budget::new(economics.fixed_costs, economics.electric_costs);
    let strategies = StrategyOutcomes::simulate(&snapshot.window, budget);
    run_log_writer.write(RunLogEvent::new(
        RunLogEventKind::StrategiesSimulated,
        format!(
            "days={} budget={:.2}",
            snapshot.window.num_days(),
            budget.total()
        ),
    ));

    let rankings = rank_strategies(snapshot.input.coin_mined, &strategies.totals())?;
    if let Some(best) = rankings.first() {
        run_log_writer.write(RunLogEvent::new(
            RunLogEventKind::StrategiesRanked,
            format!("best={} ({:+.2}%)", best.strategy.as_str(), best.percentage),
        ));
    }

    Ok(ScenarioReport {
        economics,
        strategies,
        rankings,
        window: snapshot.window.clone(),
    })
}

#[derive(Clone)]
pub struct ScenarioEngine {
    sources: ScenarioSources,
}

impl ScenarioEngine {
    pub fn new(sources: ScenarioSources) -> Self {
        Self { sources }
    }

    pub async fn run(
        &self,
        request: &ScenarioRequest,
        run_log_writer: &mut dyn RunLogWriter,
    ) -> Result<ScenarioReport, ScenarioError> {
        let result = match gather(request, &self.sources).await {
            Ok(snapshot) => {
                run_log_writer.write(RunLogEvent::new(
                    RunLogEventKind::InputsGathered,
                    format!(
                        "start={} days={} spot={:.2} mined={}",
                        request.start_date,
                        snapshot.window.num_days(),
                        snapshot.spot_price,
                        snapshot.input.coin_mined
                    ),
                ));
                evaluate(&snapshot, run_log_writer)
            }
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            run_log_writer.write(RunLogEvent::new(
                RunLogEventKind::ScenarioFailed,
                format!("{}: {err}", err.kind().as_str()),
            ));
        }
        result
    }
}
