use std::cmp::Ordering;

use economics::{EconomicsError, Ratio};
use serde::Serialize;

use crate::accumulation::{StrategyKind, StrategyOutcomes};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyTotal {
    pub strategy: StrategyKind,
    pub final_total: f64,
}

/// Positive `percentage` means the strategy would have beaten mining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRanking {
    pub strategy: StrategyKind,
    pub final_total: f64,
    pub percentage: f64,
}

impl StrategyOutcomes {
    pub fn totals(&self) -> Vec<StrategyTotal> {
        self.curves()
            .into_iter()
            .map(|curve| StrategyTotal {
                strategy: curve.strategy,
                final_total: curve.final_total,
            })
            .collect()
    }
}

pub fn relative_performance(strategy_total: f64, mined_total: f64) -> Result<f64, EconomicsError> {
    if mined_total == 0.0 {
        return Err(EconomicsError::DivisionByZero(Ratio::MinedTotal));
    }

    let ratio = strategy_total / mined_total;
    let percentage = if ratio < 1.0 {
        -(1.0 - ratio) * 100.0
    } else if ratio > 1.0 {
        (ratio - 1.0) * 100.0
    } else {
        0.0
    };
    Ok(percentage)
}

fn best_first(a: &StrategyRanking, b: &StrategyRanking) -> Ordering {
    b.final_total
        .total_cmp(&a.final_total)
        .then_with(|| a.strategy.as_str().cmp(b.strategy.as_str()))
}

/// Ranks strategies best first. Equal totals stay as separate entries,
/// ordered by strategy name.
pub fn rank_strategies(
    mined_total: f64,
    totals: &[StrategyTotal],
) -> Result<Vec<StrategyRanking>, EconomicsError> {
    let mut rankings = totals
        .iter()
        .map(|total| {
            Ok(StrategyRanking {
                strategy: total.strategy,
                final_total: total.final_total,
                percentage: relative_performance(total.final_total, mined_total)?,
            })
        })
        .collect::<Result<Vec<_>, EconomicsError>>()?;

    rankings.sort_by(best_first);
    Ok(rankings)
}
