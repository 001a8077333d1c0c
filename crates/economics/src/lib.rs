pub mod breakeven;
pub mod dates;
mod scenario;
mod series;

pub use breakeven::{EconomicsError, Ratio};
pub use dates::DateError;
pub use scenario::{
    evaluate_economics, EconomicsResult, ElectricCost, PowerProfile, ScenarioInput,
    ScenarioInputError,
};
pub use series::{PricePoint, PriceSeries, PriceWindow, SeriesError};
