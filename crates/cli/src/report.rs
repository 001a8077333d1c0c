use std::{
    fmt::Write as _,
    fs::File,
    io::BufWriter,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use clap::Args;
use economics::{dates, PowerProfile};
use runtime::{
    curves_csv::CurvesCsvWriter,
    feeds::{HttpPoolAccountClient, HttpSpotPriceClient, JsonPriceFile},
    logging::TracingRunLogWriter,
    request::{DEFAULT_KWH_PRICE, DEFAULT_UPTIME_PERCENT, DEFAULT_WATTS},
    MinedSource, ScenarioEngine, ScenarioReport, ScenarioRequest, ScenarioSources, SystemClock,
};

const DIVIDER: &str = "------------------------------------------------";

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// First day of mining, MM/DD/YYYY
    #[arg(long)]
    pub start_date: String,
    /// Electricity price per kWh
    #[arg(long, default_value_t = DEFAULT_KWH_PRICE)]
    pub kwh_price: f64,
    /// Rig power draw
    #[arg(long, default_value_t = DEFAULT_WATTS)]
    pub watts: f64,
    #[arg(long, default_value_t = DEFAULT_UPTIME_PERCENT)]
    pub uptime_percent: f64,
    /// Hardware and setup spend
    #[arg(long, default_value_t = 0.0)]
    pub fixed_costs: f64,
    /// Total coin mined, in whole coins
    #[arg(long)]
    pub bitcoin_mined: Option<f64>,
    /// Total electricity spend; derived from the rig when omitted
    #[arg(long)]
    pub electric_costs: Option<f64>,
    /// Pool API token; takes precedence over --bitcoin-mined
    #[arg(long)]
    pub slush_token: Option<String>,
    #[arg(long, default_value = "PriceDataKraken.json")]
    pub price_data: PathBuf,
    #[arg(long, default_value = "https://blockchain.info/tobtc")]
    pub spot_price_url: String,
    #[arg(long, default_value = "https://slushpool.com/accounts/profile/json/btc/")]
    pub pool_url: String,
    #[arg(long, default_value_t = 10)]
    pub http_timeout_secs: u64,
    /// Also write the per-day strategy curves to this CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

impl ReportArgs {
    pub fn scenario_request(&self) -> anyhow::Result<ScenarioRequest> {
        Ok(ScenarioRequest {
            start_date: self.start_date.clone(),
            power: PowerProfile {
                kwh_price: self.kwh_price,
                watts: self.watts,
                uptime_percent: self.uptime_percent,
            },
            fixed_costs: self.fixed_costs,
            electric_costs: self.electric_costs,
            mined: MinedSource::from_parts(self.slush_token.clone(), self.bitcoin_mined)?,
        })
    }

    fn sources(&self) -> anyhow::Result<ScenarioSources> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(ScenarioSources {
            spot: Arc::new(HttpSpotPriceClient::new(
                client.clone(),
                self.spot_price_url.clone(),
            )),
            pool: Arc::new(HttpPoolAccountClient::new(client, self.pool_url.clone())),
            prices: Arc::new(JsonPriceFile::new(&self.price_data)),
            clock: Arc::new(SystemClock),
        })
    }
}

pub async fn run(args: ReportArgs) -> anyhow::Result<()> {
    let request = args.scenario_request()?;
    let engine = ScenarioEngine::new(args.sources()?);
    let mut run_log = TracingRunLogWriter;

    let report = engine.run(&request, &mut run_log).await?;
    print!("{}", render_report(&report));

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        CurvesCsvWriter::new(BufWriter::new(file))
            .write_report_and_log(&report, &mut run_log)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nStrategy curves written to {}", path.display());
    }
    Ok(())
}

pub fn render_report(report: &ScenarioReport) -> String {
    let economics = &report.economics;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Spot price: ${:.2}", economics.spot_price);
    let _ = writeln!(out, "Days since start: {:.2}", economics.days_elapsed);
    let _ = writeln!(
        out,
        "Average coins per day: {:.8}",
        economics.average_coin_per_day
    );
    let _ = writeln!(out, "Gross revenue: ${:.2}", economics.gross_revenue);
    let _ = writeln!(out, "Total electric costs: ${:.2}", economics.electric_costs);
    let _ = writeln!(
        out,
        "Electric costs per day: ${:.2}",
        economics.daily_electric_cost
    );
    let _ = writeln!(out, "Percent paid off: {:.2}%", economics.percent_paid_off);
    let _ = writeln!(
        out,
        "Price increase needed to break even: {:.2}%",
        economics.breakeven_price_increase
    );
    let _ = writeln!(out, "Breakeven price: ${:.2}", economics.breakeven_price);
    let _ = writeln!(
        out,
        "Days until breakeven: {:.2}",
        economics.days_until_breakeven
    );
    let _ = writeln!(
        out,
        "Total mining days to breakeven: {:.2}",
        economics.total_mining_days_to_breakeven
    );
    let _ = writeln!(
        out,
        "Projected breakeven date: {}",
        dates::format_date(economics.projected_breakeven_date)
    );

    let _ = writeln!(out, "\n{DIVIDER}\n");
    let _ = writeln!(out, "Coin mined: {}", economics.coin_mined);
    for curve in report.strategies.curves() {
        let _ = writeln!(out, "{}: {:.8}", curve.strategy.as_str(), curve.final_total);
    }

    let _ = writeln!(out, "\n{DIVIDER}\n");
    let _ = writeln!(out, "Strategies versus mining:");
    for ranking in &report.rankings {
        let _ = writeln!(
            out,
            "{}: {:.2}%",
            ranking.strategy.as_str(),
            ranking.percentage
        );
    }
    out
}
