use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tax_core::DEFAULT_WEEKS_PER_YEAR;
use tax_core::calculations::{BisectionConfig, InversionStrategy};
use tracing::debug;

use tax_cli::app::{self, RunConfig};
use tax_cli::logging;
use tax_cli::table::{TableLayout, default_hours, default_net_weekly_incomes};

// ─── CLI definition ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Solve each tier's linear equation directly.
    ClosedForm,
    /// Search for the gross income by bisection.
    Bisection,
}

impl From<Strategy> for InversionStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::ClosedForm => InversionStrategy::ClosedForm,
            Strategy::Bisection => InversionStrategy::Bisection(BisectionConfig::default()),
        }
    }
}

/// Gross hourly income table.
///
/// Prints the gross hourly rate needed to take home each net weekly income
/// (over 52 weeks) for each number of hours worked per week, after
/// progressive income tax.
#[derive(Debug, Parser)]
#[command(name = "hourly-wage")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file of tax tiers (`cutoff,rate` columns). Defaults to the
    /// New Zealand 2016/17 schedule.
    #[arg(long)]
    tiers: Option<PathBuf>,

    /// Paid working weeks per year.
    #[arg(long, default_value_t = DEFAULT_WEEKS_PER_YEAR)]
    weeks: Decimal,

    /// Comma separated hours per week, one column each.
    #[arg(long, value_delimiter = ',', default_values_t = default_hours())]
    hours: Vec<Decimal>,

    /// Comma separated net weekly incomes, one row each.
    #[arg(long, value_delimiter = ',', default_values_t = default_net_weekly_incomes())]
    net_weekly: Vec<Decimal>,

    /// How gross income is solved from net income.
    #[arg(long, value_enum, default_value_t = Strategy::ClosedForm)]
    strategy: Strategy,

    /// Log filter (e.g. `debug` or `tax_core=trace`). Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            tiers: cli.tiers,
            layout: TableLayout {
                hours: cli.hours,
                net_weekly_incomes: cli.net_weekly,
                weeks_per_year: cli.weeks,
            },
            strategy: cli.strategy.into(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    debug!(?cli, "parsed arguments");

    let table = app::build_table(&RunConfig::from(cli))?;
    print!("{table}");

    Ok(())
}
