use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates::day_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("price at index {index} is not a positive finite number")]
    NonPositivePrice { index: usize },
    #[error("timestamp at index {index} does not increase on the previous entry")]
    NonIncreasingTimestamp { index: usize },
    #[error("no price data starting at timestamp {start}")]
    EmptySeries { start: i64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SeriesError::NonPositivePrice { index });
            }
            if index > 0 && points[index - 1].timestamp >= point.timestamp {
                return Err(SeriesError::NonIncreasingTimestamp { index });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Candidates dated after the last entry, in timestamp order with at most
    /// one point per timestamp (the first one seen wins).
    pub fn newer_points(&self, candidates: &[PricePoint]) -> Vec<PricePoint> {
        let after = self.last().map_or(i64::MIN, |point| point.timestamp);
        let mut newer: Vec<PricePoint> = candidates
            .iter()
            .filter(|point| point.timestamp > after)
            .copied()
            .collect();
        newer.sort_by_key(|point| point.timestamp);
        newer.dedup_by_key(|point| point.timestamp);
        newer
    }

    pub fn append_newer(&mut self, candidates: &[PricePoint]) -> Result<usize, SeriesError> {
        let newer = self.newer_points(candidates);
        let mut points = self.points.clone();
        points.extend_from_slice(&newer);
        *self = Self::new(points)?;
        Ok(newer.len())
    }

    /// Suffix of the series beginning at the entry whose timestamp is exactly
    /// `start`. A start that is missing from the history yields
    /// [`SeriesError::EmptySeries`].
    pub fn window_from_timestamp(&self, start: i64) -> Result<PriceWindow, SeriesError> {
        let index = self
            .points
            .binary_search_by_key(&start, |point| point.timestamp)
            .map_err(|_| SeriesError::EmptySeries { start })?;

        Ok(PriceWindow {
            points: self.points[index..].to_vec(),
        })
    }

    pub fn window_from(&self, start: Date) -> Result<PriceWindow, SeriesError> {
        self.window_from_timestamp(day_timestamp(start))
    }

    /// Timestamps present in `other` but missing from this series.
    pub fn missing_from(&self, other: &PriceSeries) -> Vec<PricePoint> {
        other
            .points
            .iter()
            .filter(|point| {
                self.points
                    .binary_search_by_key(&point.timestamp, |own| own.timestamp)
                    .is_err()
            })
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    points: Vec<PricePoint>,
}

impl PriceWindow {
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.price)
    }

    pub fn first_price(&self) -> f64 {
        self.points[0].price
    }

    pub fn num_days(&self) -> usize {
        self.points.len()
    }
}
