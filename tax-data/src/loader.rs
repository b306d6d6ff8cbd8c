use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{ScheduleError, TaxSchedule, TaxTier};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax tier data.
#[derive(Debug, Error)]
pub enum TaxTierLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read tax tiers from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tax schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

impl From<csv::Error> for TaxTierLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTierLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a tax tiers CSV file.
///
/// - `cutoff`: upper bound of the tier. Empty, `inf` or `unbounded` marks the
///   open-ended top tier.
/// - `rate`: the marginal tax rate as a decimal (e.g., 0.175 for 17.5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxTierRecord {
    #[serde(deserialize_with = "deserialize_cutoff")]
    pub cutoff: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

impl TaxTierRecord {
    fn to_tier(&self) -> TaxTier {
        TaxTier::new(
            self.cutoff.unwrap_or(TaxSchedule::UNBOUNDED_CUTOFF),
            self.rate,
        )
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, rust_decimal::Error> {
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_decimal(s.trim()).map_err(serde::de::Error::custom)
}

fn deserialize_cutoff<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if is_unbounded(s) => Ok(None),
        Some(s) => parse_decimal(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn is_unbounded(s: &str) -> bool {
    ["inf", "infinity", "unbounded"]
        .iter()
        .any(|word| s.eq_ignore_ascii_case(word))
}

/// Loader for tax tier tables from CSV files.
///
/// The CSV has a header row with `cutoff` and `rate` columns and one row per
/// tier, lowest cutoff first:
///
/// ```csv
/// cutoff,rate
/// 14000,0.105
/// 48000,0.175
/// 70000,0.3
/// inf,0.33
/// ```
pub struct TaxTierLoader;

impl TaxTierLoader {
    /// Parse tax tier records from a CSV reader.
    ///
    /// Returns the records in file order without validating them as a
    /// schedule. The reader can be any type that implements `Read`, such as
    /// a file or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxTierRecord>, TaxTierLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxTierRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated schedule from parsed records.
    ///
    /// Records without a cutoff take [`TaxSchedule::UNBOUNDED_CUTOFF`].
    pub fn into_schedule(records: &[TaxTierRecord]) -> Result<TaxSchedule, TaxTierLoaderError> {
        let tiers = records.iter().map(TaxTierRecord::to_tier).collect();
        Ok(TaxSchedule::new(tiers)?)
    }

    /// Parse and validate a schedule from a CSV reader.
    pub fn load<R: Read>(reader: R) -> Result<TaxSchedule, TaxTierLoaderError> {
        let records = Self::parse(reader)?;
        let schedule = Self::into_schedule(&records)?;
        debug!(tiers = schedule.tiers().len(), "loaded tax schedule");
        Ok(schedule)
    }

    /// Parse and validate a schedule from a CSV file on disk.
    pub fn load_from_file(path: &Path) -> Result<TaxSchedule, TaxTierLoaderError> {
        let file = File::open(path).map_err(|source| TaxTierLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(file)
    }
}
