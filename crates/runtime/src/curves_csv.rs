use std::io::{self, Write};

use strategy::StrategyKind;

use crate::{
    engine::ScenarioReport,
    logging::{RunLogEvent, RunLogEventKind, RunLogWriter},
};

pub const CURVES_CSV_HEADER: &str =
    "day,timestamp,price,american_hodl,daily_dca,anti_miner,mined\n";

/// Writes one row per window day. Curve columns are left empty when the
/// report was stripped of its per-day values.
pub struct CurvesCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CurvesCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_report(&mut self, report: &ScenarioReport) -> io::Result<()> {
        self.writer.write_all(CURVES_CSV_HEADER.as_bytes())?;

        let mined = report.economics.coin_mined;
        for (day, point) in report.window.points().iter().enumerate() {
            let [hodl, dca, anti_miner] = StrategyKind::ALL.map(|kind| {
                report
                    .strategies
                    .curve(kind)
                    .cumulative
                    .get(day)
                    .map(f64::to_string)
                    .unwrap_or_default()
            });
            writeln!(
                self.writer,
                "{day},{},{},{hodl},{dca},{anti_miner},{mined}",
                point.timestamp, point.price
            )?;
        }
        Ok(())
    }

    pub fn write_report_and_log(
        &mut self,
        report: &ScenarioReport,
        run_log_writer: &mut dyn RunLogWriter,
    ) -> io::Result<()> {
        self.write_report(report)?;
        self.writer.flush()?;
        run_log_writer.write(RunLogEvent::new(
            RunLogEventKind::CurvesExported,
            format!("rows={}", report.window.num_days()),
        ));
        Ok(())
    }
}
