use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration,
    OffsetDateTime,
};

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("date `{0}` is not in MM/DD/YYYY format")]
    InvalidFormat(String),
    #[error("date falls outside the supported calendar range")]
    OutOfRange,
}

pub fn parse_start_date(value: &str) -> Result<Date, DateError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|_| DateError::InvalidFormat(value.to_owned()))
}

pub fn format_date(date: Date) -> String {
    // The format has no components that can fail for a valid `Date`.
    date.format(DATE_FORMAT).unwrap_or_default()
}

pub fn serialize_date<S: serde::Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

pub fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

pub fn day_timestamp(date: Date) -> i64 {
    start_of_day(date).unix_timestamp()
}

/// Fractional days between midnight UTC on `start` and `now`.
pub fn days_since(start: Date, now: OffsetDateTime) -> f64 {
    (now - start_of_day(start)).as_seconds_f64() / SECONDS_PER_DAY
}

/// Calendar day reached after adding `days_until_breakeven` days to `now`.
///
/// Negative inputs move backwards, which is how an already profitable
/// operation reports the day it crossed breakeven.
pub fn projected_breakeven_date(
    now: OffsetDateTime,
    days_until_breakeven: f64,
) -> Result<Date, DateError> {
    let offset = Duration::checked_seconds_f64(days_until_breakeven * SECONDS_PER_DAY)
        .ok_or(DateError::OutOfRange)?;

    now.checked_add(offset)
        .map(OffsetDateTime::date)
        .ok_or(DateError::OutOfRange)
}
