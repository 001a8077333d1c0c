mod compare;
mod report;
mod update_prices;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mining-roi", author, version, about = "Was home mining worth it?", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a mining operation against the buy-instead strategies
    Report(report::ReportArgs),
    /// List days present in one price feed but absent from another
    CompareFeeds(compare::CompareFeedsArgs),
    /// Append the latest daily open prices to the price file
    UpdatePrices(update_prices::UpdatePricesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Report(args) => report::run(args).await,
        Command::CompareFeeds(args) => compare::run(&args),
        Command::UpdatePrices(args) => update_prices::run(args).await,
    }
}
