use std::path::PathBuf;

use anyhow::{Context, Result};
use tax_core::calculations::InversionStrategy;
use tax_core::{IncomeInverter, TaxSchedule};
use tax_data::TaxTierLoader;
use tracing::info;

use crate::table::{TableLayout, WageTable};

/// Everything needed to produce one wage table.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// CSV file with the tax tiers; the built-in NZ 2016 schedule when `None`.
    pub tiers: Option<PathBuf>,
    pub layout: TableLayout,
    pub strategy: InversionStrategy,
}

/// Loads the configured tax schedule.
pub fn load_schedule(config: &RunConfig) -> Result<TaxSchedule> {
    match &config.tiers {
        Some(path) => {
            let schedule = TaxTierLoader::load_from_file(path)
                .with_context(|| format!("Failed to load tax tiers from: {}", path.display()))?;
            info!(
                path = %path.display(),
                tiers = schedule.tiers().len(),
                "using tax tiers from file"
            );
            Ok(schedule)
        }
        None => Ok(TaxSchedule::nz_2016()),
    }
}

/// Builds the wage table described by `config`.
pub fn build_table(config: &RunConfig) -> Result<WageTable> {
    let schedule = load_schedule(config)?;
    let inverter = IncomeInverter::with_strategy(&schedule, config.strategy);

    WageTable::build(&inverter, &config.layout).context("Failed to compute wage table")
}
