use std::fmt;

use serde::Serialize;

const HOURS_PER_DAY: f64 = 24.0;
const WATTS_PER_KILOWATT: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Ratio {
    DaysElapsed,
    TotalCost,
    PercentPaidOff,
    MinedTotal,
}

impl Ratio {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DaysElapsed => "days elapsed",
            Self::TotalCost => "total cost",
            Self::PercentPaidOff => "percent paid off",
            Self::MinedTotal => "mined total",
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EconomicsError {
    #[error("division by zero: {0} is zero")]
    DivisionByZero(Ratio),
}

fn checked_div(numerator: f64, denominator: f64, ratio: Ratio) -> Result<f64, EconomicsError> {
    if denominator == 0.0 {
        return Err(EconomicsError::DivisionByZero(ratio));
    }
    Ok(numerator / denominator)
}

pub fn average_yield_per_day(days_elapsed: f64, coin_mined: f64) -> Result<f64, EconomicsError> {
    checked_div(coin_mined, days_elapsed, Ratio::DaysElapsed)
}

pub fn gross_revenue(coin_mined: f64, spot_price: f64) -> f64 {
    coin_mined * spot_price
}

pub fn operating_cost(kwh_price: f64, uptime_percent: f64, days_elapsed: f64, watts: f64) -> f64 {
    let kwh_per_day = watts * HOURS_PER_DAY / WATTS_PER_KILOWATT;
    kwh_price * kwh_per_day * (uptime_percent / 100.0) * days_elapsed
}

pub fn percent_paid_off(
    gross_revenue: f64,
    fixed_cost: f64,
    variable_cost: f64,
) -> Result<f64, EconomicsError> {
    Ok(checked_div(gross_revenue, fixed_cost + variable_cost, Ratio::TotalCost)? * 100.0)
}

/// Spot price at which revenue to date would equal cost to date.
pub fn breakeven_price(percent_paid_off: f64, spot_price: f64) -> Result<f64, EconomicsError> {
    Ok(spot_price * checked_div(100.0, percent_paid_off, Ratio::PercentPaidOff)?)
}

pub fn breakeven_price_increase(percent_paid_off: f64) -> Result<f64, EconomicsError> {
    Ok((checked_div(100.0, percent_paid_off, Ratio::PercentPaidOff)? - 1.0) * 100.0)
}

/// Further days of mining at the current rate until breakeven. Negative when
/// the operation is already past breakeven.
pub fn days_until_breakeven(
    days_elapsed: f64,
    percent_paid_off: f64,
) -> Result<f64, EconomicsError> {
    let multiple = checked_div(100.0, percent_paid_off, Ratio::PercentPaidOff)?;
    Ok(days_elapsed * multiple - days_elapsed)
}

pub fn daily_electric_cost(electric_cost: f64, days_elapsed: f64) -> Result<f64, EconomicsError> {
    checked_div(electric_cost, days_elapsed, Ratio::DaysElapsed)
}
