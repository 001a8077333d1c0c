use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    breakeven::{self, EconomicsError},
    dates::{self, DateError},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerProfile {
    pub kwh_price: f64,
    pub watts: f64,
    pub uptime_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", content = "amount", rename_all = "camelCase")]
pub enum ElectricCost {
    Override(f64),
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    #[serde(serialize_with = "dates::serialize_date")]
    pub start_date: Date,
    pub power: PowerProfile,
    pub fixed_costs: f64,
    pub electric_cost: ElectricCost,
    pub coin_mined: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioInputError {
    #[error("start date {start} is after the evaluation time")]
    StartInFuture { start: Date },
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Economics(#[from] EconomicsError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicsResult {
    pub spot_price: f64,
    pub coin_mined: f64,
    pub days_elapsed: f64,
    pub average_coin_per_day: f64,
    pub gross_revenue: f64,
    pub fixed_costs: f64,
    pub electric_costs: f64,
    pub total_cost: f64,
    pub daily_electric_cost: f64,
    pub percent_paid_off: f64,
    pub breakeven_price_increase: f64,
    pub breakeven_price: f64,
    pub days_until_breakeven: f64,
    pub total_mining_days_to_breakeven: f64,
    #[serde(serialize_with = "dates::serialize_date")]
    pub projected_breakeven_date: Date,
}

impl ScenarioInput {
    pub fn days_elapsed(&self, now: OffsetDateTime) -> Result<f64, ScenarioInputError> {
        let days = dates::days_since(self.start_date, now);
        if days < 0.0 {
            return Err(ScenarioInputError::StartInFuture {
                start: self.start_date,
            });
        }
        Ok(days)
    }

    pub fn electric_costs(&self, days_elapsed: f64) -> f64 {
        match self.electric_cost {
            ElectricCost::Override(amount) => amount,
            ElectricCost::Derived => breakeven::operating_cost(
                self.power.kwh_price,
                self.power.uptime_percent,
                days_elapsed,
                self.power.watts,
            ),
        }
    }
}

pub fn evaluate_economics(
    input: &ScenarioInput,
    spot_price: f64,
    now: OffsetDateTime,
) -> Result<EconomicsResult, ScenarioInputError> {
    let days_elapsed = input.days_elapsed(now)?;
    let electric_costs = input.electric_costs(days_elapsed);

    let average_coin_per_day = breakeven::average_yield_per_day(days_elapsed, input.coin_mined)?;
    let gross_revenue = breakeven::gross_revenue(input.coin_mined, spot_price);
    let percent_paid_off =
        breakeven::percent_paid_off(gross_revenue, input.fixed_costs, electric_costs)?;
    let breakeven_price = breakeven::breakeven_price(percent_paid_off, spot_price)?;
    let breakeven_price_increase = breakeven::breakeven_price_increase(percent_paid_off)?;
    let days_until_breakeven = breakeven::days_until_breakeven(days_elapsed, percent_paid_off)?;
    let projected_breakeven_date = dates::projected_breakeven_date(now, days_until_breakeven)?;
    let daily_electric_cost = breakeven::daily_electric_cost(electric_costs, days_elapsed)?;

    Ok(EconomicsResult {
        spot_price,
        coin_mined: input.coin_mined,
        days_elapsed,
        average_coin_per_day,
        gross_revenue,
        fixed_costs: input.fixed_costs,
        electric_costs,
        total_cost: input.fixed_costs + electric_costs,
        daily_electric_cost,
        percent_paid_off,
        breakeven_price_increase,
        breakeven_price,
        days_until_breakeven,
        total_mining_days_to_breakeven: days_until_breakeven + days_elapsed,
        projected_breakeven_date,
    })
}
