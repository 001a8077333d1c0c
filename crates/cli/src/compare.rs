use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use clap::Args;
use economics::{dates, PricePoint};
use runtime::feeds::JsonPriceFile;
use time::OffsetDateTime;

#[derive(Args, Debug, Clone)]
pub struct CompareFeedsArgs {
    /// Feed treated as the reference
    pub existing: PathBuf,
    /// Feed checked for days the reference lacks
    pub candidate: PathBuf,
}

pub fn run(args: &CompareFeedsArgs) -> anyhow::Result<()> {
    let existing = JsonPriceFile::new(&args.existing)
        .load_blocking()
        .with_context(|| format!("failed to load {}", args.existing.display()))?;
    let candidate = JsonPriceFile::new(&args.candidate)
        .load_blocking()
        .with_context(|| format!("failed to load {}", args.candidate.display()))?;

    let missing = existing.missing_from(&candidate);
    tracing::debug!(missing = missing.len(), "compared price feeds");
    print!("{}", render_missing(&missing));
    Ok(())
}

pub fn render_missing(missing: &[PricePoint]) -> String {
    let mut out = String::new();
    if missing.is_empty() {
        out.push_str("No missing days.\n");
        return out;
    }

    let _ = writeln!(out, "{} day(s) missing from the reference feed:", missing.len());
    for point in missing {
        let day = OffsetDateTime::from_unix_timestamp(point.timestamp)
            .map(|at| dates::format_date(at.date()))
            .unwrap_or_else(|_| point.timestamp.to_string());
        let _ = writeln!(out, "{day} {}", point.price);
    }
    out
}
