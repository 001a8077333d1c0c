use economics::PriceWindow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "AmericanHodl")]
    AmericanHodl,
    #[serde(rename = "Daily-DCA")]
    DailyDca,
    #[serde(rename = "Anti-Miner")]
    AntiHomeMiner,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::AmericanHodl, Self::DailyDca, Self::AntiHomeMiner];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AmericanHodl => "AmericanHodl",
            Self::DailyDca => "Daily-DCA",
            Self::AntiHomeMiner => "Anti-Miner",
        }
    }

    pub fn chart_label(self) -> &'static str {
        match self {
            Self::AmericanHodl => "AmericanHodl",
            Self::DailyDca => "Daily DCA",
            Self::AntiHomeMiner => "Anti-Miner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub fixed: f64,
    pub electric: f64,
}

impl Budget {
    pub fn new(fixed: f64, electric: f64) -> Self {
        Self { fixed, electric }
    }

    pub fn total(&self) -> f64 {
        self.fixed + self.electric
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyCurve {
    pub strategy: StrategyKind,
    pub final_total: f64,
    pub cumulative: Vec<f64>,
}

impl StrategyCurve {
    fn new(strategy: StrategyKind, cumulative: Vec<f64>) -> Self {
        let final_total = cumulative.last().copied().unwrap_or_default();
        Self {
            strategy,
            final_total,
            cumulative,
        }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

fn accumulate(initial_coin: f64, window: &PriceWindow, dollars_per_day: f64) -> Vec<f64> {
    let mut acquired = initial_coin;
    let mut cumulative = Vec::with_capacity(window.num_days());
    for price in window.prices() {
        acquired += dollars_per_day / price;
        cumulative.push(acquired);
    }
    cumulative
}

pub fn lump_sum(window: &PriceWindow, budget: f64) -> StrategyCurve {
    let acquired = budget / window.first_price();
    StrategyCurve::new(
        StrategyKind::AmericanHodl,
        vec![acquired; window.num_days()],
    )
}

pub fn daily_dca(window: &PriceWindow, budget: f64) -> StrategyCurve {
    let dollars_per_day = budget / window.num_days() as f64;
    StrategyCurve::new(
        StrategyKind::DailyDca,
        accumulate(0.0, window, dollars_per_day),
    )
}

/// Day 0 holds the up-front purchase plus the first daily purchase.
pub fn capital_outlay_then_recurring(
    window: &PriceWindow,
    fixed_cost: f64,
    recurring_budget: f64,
) -> StrategyCurve {
    let up_front = fixed_cost / window.first_price();
    let dollars_per_day = recurring_budget / window.num_days() as f64;
    StrategyCurve::new(
        StrategyKind::AntiHomeMiner,
        accumulate(up_front, window, dollars_per_day),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutcomes {
    pub budget: Budget,
    pub american_hodl: StrategyCurve,
    pub daily_dca: StrategyCurve,
    pub anti_home_miner: StrategyCurve,
}

impl StrategyOutcomes {
    pub fn simulate(window: &PriceWindow, budget: Budget) -> Self {
        Self {
            budget,
            american_hodl: lump_sum(window, budget.total()),
            daily_dca: daily_dca(window, budget.total()),
            anti_home_miner: capital_outlay_then_recurring(window, budget.fixed, budget.electric),
        }
    }

    pub fn curves(&self) -> [&StrategyCurve; 3] {
        [&self.american_hodl, &self.daily_dca, &self.anti_home_miner]
    }

    pub fn curve(&self, strategy: StrategyKind) -> &StrategyCurve {
        match strategy {
            StrategyKind::AmericanHodl => &self.american_hodl,
            StrategyKind::DailyDca => &self.daily_dca,
            StrategyKind::AntiHomeMiner => &self.anti_home_miner,
        }
    }

    pub fn without_curves(mut self) -> Self {
        self.american_hodl.cumulative.clear();
        self.daily_dca.cumulative.clear();
        self.anti_home_miner.cumulative.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use economics::{PricePoint, PriceSeries, PriceWindow};

    use super::*;

    const DAY: i64 = 86_400;
    const JAN_1_2022: i64 = 1_640_995_200;

    fn window(prices: &[f64]) -> PriceWindow {
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, price)| PricePoint::new(JAN_1_2022 + i as i64 * DAY, *price))
                .collect(),
        )
        .unwrap()
        .window_from_timestamp(JAN_1_2022)
        .unwrap()
    }

    fn assert_curve(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (day, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-12, "day {day}: expected {e}, got {a}");
        }
    }

    #[test]
    fn lump_sum_buys_everything_on_day_zero() {
        let curve = lump_sum(&window(&[100.0, 200.0, 50.0, 100.0]), 1_000.0);

        assert_eq!(curve.strategy, StrategyKind::AmericanHodl);
        assert_curve(&curve.cumulative, &[10.0, 10.0, 10.0, 10.0]);
        assert_eq!(curve.final_total, 10.0);
    }

    #[test]
    fn daily_dca_spreads_budget_across_window() {
        let curve = daily_dca(&window(&[100.0, 200.0, 50.0, 100.0]), 1_000.0);

        assert_curve(&curve.cumulative, &[2.5, 3.75, 8.75, 11.25]);
        assert_eq!(curve.final_total, 11.25);
    }

    #[test]
    fn capital_outlay_front_loads_fixed_cost_then_buys_daily() {
        let curve =
            capital_outlay_then_recurring(&window(&[100.0, 200.0, 50.0, 100.0]), 400.0, 600.0);

        assert_curve(&curve.cumulative, &[5.5, 6.25, 9.25, 10.75]);
        assert_eq!(curve.final_total, 10.75);
    }

    #[test]
    fn every_curve_spans_the_window() {
        let window = window(&[30_000.0, 31_000.0, 29_500.0, 28_000.0, 35_000.0]);

        let outcomes = StrategyOutcomes::simulate(&window, Budget::new(6_295.55, 1_200.0));

        for curve in outcomes.curves() {
            assert_eq!(curve.len(), window.num_days());
        }
    }

    #[test]
    fn accumulating_curves_never_decrease_and_lump_sum_is_flat() {
        let prices = [41_000.0, 39_500.5, 47_100.0, 18_800.0, 18_800.0, 63_000.0, 0.5];
        let outcomes = StrategyOutcomes::simulate(&window(&prices), Budget::new(5_000.0, 2_500.0));

        for curve in [&outcomes.daily_dca, &outcomes.anti_home_miner] {
            assert!(curve.cumulative.windows(2).all(|pair| pair[1] >= pair[0]));
        }
        let hodl = &outcomes.american_hodl.cumulative;
        assert!(hodl.iter().all(|value| *value == hodl[0]));
    }

    #[test]
    fn single_day_window_deploys_whole_budget_that_day() {
        let outcomes = StrategyOutcomes::simulate(&window(&[250.0]), Budget::new(400.0, 600.0));

        assert_curve(&outcomes.american_hodl.cumulative, &[4.0]);
        assert_curve(&outcomes.daily_dca.cumulative, &[4.0]);
        assert_curve(&outcomes.anti_home_miner.cumulative, &[4.0]);
    }

    #[test]
    fn without_curves_keeps_final_totals() {
        let outcomes =
            StrategyOutcomes::simulate(&window(&[100.0, 200.0, 50.0, 100.0]), Budget::new(400.0, 600.0))
                .without_curves();

        assert!(outcomes.daily_dca.is_empty());
        assert_eq!(outcomes.daily_dca.final_total, 11.25);
        assert_eq!(outcomes.curve(StrategyKind::AntiHomeMiner).final_total, 10.75);
    }

    #[test]
    fn strategy_kinds_serialize_with_report_names() {
        let names: Vec<_> = StrategyKind::ALL
            .iter()
            .map(|kind| serde_json::to_value(kind).unwrap())
            .collect();

        assert_eq!(names, vec!["AmericanHodl", "Daily-DCA", "Anti-Miner"]);
    }
}
