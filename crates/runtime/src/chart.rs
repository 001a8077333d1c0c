use serde::Serialize;
use strategy::StrategyKind;

use crate::engine::ScenarioReport;

pub const CHART_TITLE: &str = "Bitcoin Acquired Over Time";
pub const X_AXIS_LABEL: &str = "Time";
pub const Y_AXIS_LABEL: &str = "Bitcoin";
pub const MINED_LABEL: &str = "Mined";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub hide_y_ticks: bool,
    pub timestamps: Vec<i64>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Needs a report that still carries its per-day curves.
    pub fn from_report(report: &ScenarioReport, hide_coin_axis: bool) -> Self {
        let timestamps: Vec<i64> = report
            .window
            .points()
            .iter()
            .map(|point| point.timestamp)
            .collect();

        let mut series: Vec<ChartSeries> = StrategyKind::ALL
            .into_iter()
            .map(|kind| ChartSeries {
                label: kind.chart_label().to_owned(),
                values: report.strategies.curve(kind).cumulative.clone(),
            })
            .collect();
        series.push(ChartSeries {
            label: MINED_LABEL.to_owned(),
            values: vec![report.economics.coin_mined; timestamps.len()],
        });
        if hide_coin_axis {
            normalize(&mut series);
        }

        Self {
            title: CHART_TITLE.to_owned(),
            x_label: X_AXIS_LABEL.to_owned(),
            y_label: if hide_coin_axis {
                String::new()
            } else {
                Y_AXIS_LABEL.to_owned()
            },
            hide_y_ticks: hide_coin_axis,
            timestamps,
            series,
        }
    }
}

// Divides every value by the chart-wide maximum so no absolute amount survives.
fn normalize(series: &mut [ChartSeries]) {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return;
    }
    for value in series.iter_mut().flat_map(|s| s.values.iter_mut()) {
        *value /= max;
    }
}
