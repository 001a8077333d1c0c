pub mod accumulation;
pub mod ranking;

pub use accumulation::{
    capital_outlay_then_recurring, daily_dca, lump_sum, Budget, StrategyCurve, StrategyKind,
    StrategyOutcomes,
};
pub use ranking::{rank_strategies, relative_performance, StrategyRanking, StrategyTotal};
