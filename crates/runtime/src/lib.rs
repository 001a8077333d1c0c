pub mod chart;
pub mod curves_csv;
pub mod engine;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod request;
pub mod sources;

pub use chart::{ChartData, ChartSeries};
pub use engine::{evaluate, gather, ScenarioEngine, ScenarioReport, ScenarioSnapshot};
pub use error::{ErrorKind, ScenarioError};
pub use request::{MinedSource, ScenarioRequest};
pub use sources::{
    Clock, FixedClock, PoolAccountSource, PriceSeriesSource, ScenarioSources, SourceError,
    SpotPriceSource, SystemClock,
};
