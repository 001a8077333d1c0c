use std::path::PathBuf;

use async_trait::async_trait;
use economics::{PricePoint, PriceSeries};
use serde::Deserialize;

use crate::sources::{PriceSeriesSource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePriceFileError {
    InvalidJson,
    InvalidTimestamp { index: usize },
}

#[derive(Debug, Deserialize)]
struct PriceFile {
    data: Vec<PriceRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRow {
    timestamp: RawTimestamp,
    open_price: f64,
}

/// Historical rows store the day as a string; rows appended later store it as
/// a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Number(f64),
}

impl RawTimestamp {
    fn seconds(&self) -> Option<i64> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => Some(*value as i64),
            Self::Number(_) => None,
        }
    }
}

/// Raw rows of a `{"data":[{"timestamp":..,"openPrice":..}]}` price file in
/// file order. Ordering and price validity are checked by [`PriceSeries::new`].
pub fn parse_price_file(bytes: &[u8]) -> Result<Vec<PricePoint>, ParsePriceFileError> {
    let file: PriceFile =
        serde_json::from_slice(bytes).map_err(|_| ParsePriceFileError::InvalidJson)?;

    file.data
        .iter()
        .enumerate()
        .map(|(index, row)| {
            row.timestamp
                .seconds()
                .map(|timestamp| PricePoint::new(timestamp, row.open_price))
                .ok_or(ParsePriceFileError::InvalidTimestamp { index })
        })
        .collect()
}

pub fn append_rows(bytes: &[u8], points: &[PricePoint]) -> Result<Vec<u8>, ParsePriceFileError> {
    let mut file: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|_| ParsePriceFileError::InvalidJson)?;
    let rows = file
        .get_mut("data")
        .and_then(serde_json::Value::as_array_mut)
        .ok_or(ParsePriceFileError::InvalidJson)?;

    rows.extend(points.iter().map(|point| {
        serde_json::json!({ "timestamp": point.timestamp, "openPrice": point.price })
    }));
    serde_json::to_vec_pretty(&file).map_err(|_| ParsePriceFileError::InvalidJson)
}

#[derive(Debug, Clone)]
pub struct JsonPriceFile {
    path: PathBuf,
}

impl JsonPriceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_blocking(&self) -> Result<PriceSeries, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        self.decode(&bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PriceSeries, SourceError> {
        let points = parse_price_file(bytes).map_err(|error| SourceError::Malformed {
            path: self.path.clone(),
            error,
        })?;

        PriceSeries::new(points).map_err(|source| SourceError::InvalidSeries {
            path: self.path.clone(),
            source,
        })
    }
}

impl JsonPriceFile {
    /// Adds the candidates dated after the file's last row. The file is
    /// replaced by renaming a temporary sibling.
    pub async fn append_newer(&self, candidates: &[PricePoint]) -> Result<usize, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let mut series = self.decode(&bytes)?;
        let newer = series.newer_points(candidates);
        if newer.is_empty() {
            return Ok(0);
        }
        series
            .append_newer(&newer)
            .map_err(|source| SourceError::InvalidSeries {
                path: self.path.clone(),
                source,
            })?;

        let updated = append_rows(&bytes, &newer).map_err(|error| SourceError::Malformed {
            path: self.path.clone(),
            error,
        })?;
        let write_error = |source| SourceError::Write {
            path: self.path.clone(),
            source,
        };
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, updated).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(write_error)?;

        tracing::info!(path = %self.path.display(), added = newer.len(), "appended price data");
        Ok(newer.len())
    }
}

#[async_trait]
impl PriceSeriesSource for JsonPriceFile {
    async fn price_series(&self) -> Result<PriceSeries, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let series = self.decode(&bytes)?;
        tracing::debug!(path = %self.path.display(), days = series.len(), "loaded price data");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use economics::{PricePoint, SeriesError};

    use super::{append_rows, parse_price_file, JsonPriceFile, ParsePriceFileError};
    use crate::sources::{PriceSeriesSource, SourceError};

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("price-file-{name}-{unique}.json"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_string_and_numeric_timestamps() {
        let raw = br#"{"data":[
            {"timestamp":"1640995200","openPrice":46216.93},
            {"timestamp":1641081600,"openPrice":47722.66}
        ]}"#;

        let points = parse_price_file(raw).unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint::new(1_640_995_200, 46_216.93),
                PricePoint::new(1_641_081_600, 47_722.66),
            ]
        );
    }

    #[test]
    fn reports_index_of_unreadable_timestamp() {
        let raw = br#"{"data":[
            {"timestamp":"1640995200","openPrice":46216.93},
            {"timestamp":"yesterday","openPrice":47722.66}
        ]}"#;

        assert_eq!(
            parse_price_file(raw),
            Err(ParsePriceFileError::InvalidTimestamp { index: 1 })
        );
    }

    #[test]
    fn rejects_files_without_data_array() {
        assert_eq!(
            parse_price_file(br#"{"prices":[]}"#),
            Err(ParsePriceFileError::InvalidJson)
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn loads_series_from_disk() {
        let path = temp_file(
            "ok",
            r#"{"data":[{"timestamp":"1640995200","openPrice":100.0},{"timestamp":"1641081600","openPrice":200.0}]}"#,
        );

        let series = JsonPriceFile::new(&path).price_series().await.unwrap();

        assert_eq!(series.len(), 2);
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn out_of_order_rows_are_an_invalid_series() {
        let path = temp_file(
            "unordered",
            r#"{"data":[{"timestamp":"1641081600","openPrice":100.0},{"timestamp":"1640995200","openPrice":200.0}]}"#,
        );

        let err = JsonPriceFile::new(&path).price_series().await.unwrap_err();

        assert!(matches!(
            err,
            SourceError::InvalidSeries {
                source: SeriesError::NonIncreasingTimestamp { index: 1 },
                ..
            }
        ));
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_file_is_a_read_error() {
        let err = JsonPriceFile::new("/nonexistent/PriceDataKraken.json")
            .price_series()
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn appended_rows_follow_existing_rows() {
        let raw = br#"{"data":[{"timestamp":"1640995200","openPrice":100.0}]}"#;

        let updated = append_rows(raw, &[PricePoint::new(1_641_081_600, 200.5)]).unwrap();

        assert_eq!(
            parse_price_file(&updated).unwrap(),
            vec![
                PricePoint::new(1_640_995_200, 100.0),
                PricePoint::new(1_641_081_600, 200.5),
            ]
        );
        let json: serde_json::Value = serde_json::from_slice(&updated).unwrap();
        assert_eq!(json["data"][0]["timestamp"], "1640995200");
        assert_eq!(json["data"][1]["timestamp"], 1_641_081_600);
    }

    #[test]
    fn appending_needs_a_data_array() {
        assert_eq!(
            append_rows(br#"{"data":{}}"#, &[]),
            Err(ParsePriceFileError::InvalidJson)
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn append_newer_rewrites_file_with_only_new_days() {
        let path = temp_file(
            "append",
            r#"{"data":[{"timestamp":"1640995200","openPrice":100.0},{"timestamp":"1641081600","openPrice":200.0}]}"#,
        );
        let file = JsonPriceFile::new(&path);

        let added = file
            .append_newer(&[
                PricePoint::new(1_641_081_600, 999.0),
                PricePoint::new(1_641_168_000, 50.0),
            ])
            .await
            .unwrap();
        let again = file
            .append_newer(&[PricePoint::new(1_641_168_000, 50.0)])
            .await
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(again, 0);
        let series = file.price_series().await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[1].price, 200.0);
        fs::remove_file(&path).unwrap();
    }
}
