use economics::{DateError, EconomicsError, ScenarioInputError, SeriesError};

use crate::sources::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    InvalidRequest,
    DivisionByZero,
    EmptySeries,
    /// A computed date that the calendar cannot represent.
    OutOfRange,
    UpstreamUnavailable,
    InvalidPriceData,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse_error",
            Self::InvalidRequest => "invalid_request",
            Self::DivisionByZero => "division_by_zero",
            Self::EmptySeries => "empty_series",
            Self::OutOfRange => "out_of_range",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::InvalidPriceData => "invalid_price_data",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("either a pool account token or a mined amount must be supplied")]
    MissingMinedSource,
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Input(#[from] ScenarioInputError),
    #[error(transparent)]
    Economics(#[from] EconomicsError),
}

impl ScenarioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Date(DateError::InvalidFormat(_)) => ErrorKind::Parse,
            Self::Date(DateError::OutOfRange) => ErrorKind::OutOfRange,
            Self::MissingMinedSource => ErrorKind::InvalidRequest,
            Self::Series(SeriesError::EmptySeries { .. }) => ErrorKind::EmptySeries,
            Self::Series(_) => ErrorKind::InvalidPriceData,
            Self::Source(source) if source.is_upstream() => ErrorKind::UpstreamUnavailable,
            Self::Source(_) => ErrorKind::InvalidPriceData,
            Self::Input(ScenarioInputError::StartInFuture { .. }) => ErrorKind::InvalidRequest,
            Self::Input(ScenarioInputError::Date(DateError::InvalidFormat(_))) => ErrorKind::Parse,
            Self::Input(ScenarioInputError::Date(DateError::OutOfRange)) => ErrorKind::OutOfRange,
            Self::Input(ScenarioInputError::Economics(_)) | Self::Economics(_) => {
                ErrorKind::DivisionByZero
            }
        }
    }
}
