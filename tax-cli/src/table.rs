//! Reference table of gross hourly wages.
//!
//! Each row is a net weekly income (paid over all 52 calendar weeks) and each
//! column a number of hours worked per week. Cells hold the gross hourly rate
//! that yields the row's net income after tax when working the column's hours
//! for the configured number of weeks per year.
//!
//! ```text
//! ------------------------------------------------------
//! Gross hourly income given
//! net (weekly, yearly) income for 52 weeks per year and
//! hours worked per week for 46 weeks per year
//! ------------------------------------------------------
//!                      5    10    15    20    25    30    35   40
//!    ($100, $5200)   $25   $13    $8    $6    $5    $4    $4   $3
//!   ($200, $10400)   $51   $25   $17   $13   $10    $8    $7   $6
//! ...
//! ```

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::common::round_whole;
use tax_core::{
    DEFAULT_WEEKS_PER_YEAR, IncomeInverter, NET_WEEKS_PER_YEAR, TaxError, WorkSchedule,
    WorkScheduleError,
};
use thiserror::Error;
use tracing::debug;

const RULE: &str = "------------------------------------------------------";

/// Padding added to the left of every column except the row labels.
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid work schedule: {0}")]
    WorkSchedule(#[from] WorkScheduleError),

    #[error("cannot compute gross hourly rate for net weekly income {net_weekly}: {source}")]
    Tax {
        net_weekly: Decimal,
        #[source]
        source: TaxError,
    },
}

/// Hours per week 5, 10, ..., 40.
pub fn default_hours() -> Vec<Decimal> {
    (1..=8).map(|i| Decimal::from(5 * i)).collect()
}

/// Net weekly incomes 100, 200, ..., 2500.
pub fn default_net_weekly_incomes() -> Vec<Decimal> {
    (1..=25).map(|i| Decimal::from(100 * i)).collect()
}

/// Row and column values for a wage table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub hours: Vec<Decimal>,
    pub net_weekly_incomes: Vec<Decimal>,
    pub weeks_per_year: Decimal,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            hours: default_hours(),
            net_weekly_incomes: default_net_weekly_incomes(),
            weeks_per_year: DEFAULT_WEEKS_PER_YEAR,
        }
    }
}

/// A fully computed table, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageTable {
    weeks_per_year: Decimal,
    /// Header row first, then one row per net weekly income.
    cells: Vec<Vec<String>>,
}

impl WageTable {
    /// Computes every cell of the table with `inverter`.
    pub fn build(
        inverter: &IncomeInverter<'_>,
        layout: &TableLayout,
    ) -> Result<Self, TableError> {
        let schedules = layout
            .hours
            .iter()
            .map(|&hours| WorkSchedule::new(hours, layout.weeks_per_year))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cells: Vec<Vec<String>> = Vec::with_capacity(layout.net_weekly_incomes.len() + 1);
        cells.push(
            std::iter::once(" ".to_string())
                .chain(layout.hours.iter().map(|h| h.normalize().to_string()))
                .collect(),
        );

        for &net_weekly in &layout.net_weekly_incomes {
            let mut row = Vec::with_capacity(schedules.len() + 1);
            row.push(row_label(net_weekly)?);
            for work in &schedules {
                let hourly = inverter
                    .gross_hourly_rate(net_weekly, work)
                    .map_err(|source| TableError::Tax { net_weekly, source })?;
                row.push(format!("${}", round_whole(hourly)));
            }
            cells.push(row);
        }

        debug!(
            rows = layout.net_weekly_incomes.len(),
            columns = layout.hours.len(),
            "built wage table"
        );

        Ok(Self {
            weeks_per_year: layout.weeks_per_year,
            cells,
        })
    }

    /// Header row followed by the data rows.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Right-justification width for each column.
    ///
    /// The label column is as wide as its longest entry; every other column
    /// gets [`COLUMN_PADDING`] extra spaces.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.cells.first().map_or(0, Vec::len);
        (0..columns)
            .map(|j| {
                let widest = self
                    .cells
                    .iter()
                    .filter_map(|row| row.get(j))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                if j == 0 { widest } else { widest + COLUMN_PADDING }
            })
            .collect()
    }
}

impl fmt::Display for WageTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:<width$}", "Gross hourly income given", width = RULE.len())?;
        writeln!(
            f,
            "net (weekly, yearly) income for {NET_WEEKS_PER_YEAR} weeks per year and"
        )?;
        writeln!(
            f,
            "hours worked per week for {} weeks per year ",
            self.weeks_per_year.normalize()
        )?;
        writeln!(f, "{RULE}")?;

        let widths = self.column_widths();
        for row in &self.cells {
            for (cell, width) in row.iter().zip(widths.iter().copied()) {
                write!(f, "{cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn row_label(net_weekly: Decimal) -> Result<String, TableError> {
    let net_yearly = net_weekly
        .checked_mul(NET_WEEKS_PER_YEAR)
        .ok_or(TableError::Tax {
            net_weekly,
            source: TaxError::Overflow,
        })?;
    Ok(format!(
        "(${}, ${})",
        net_weekly.normalize(),
        net_yearly.normalize()
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::TaxSchedule;

    use super::*;

    fn small_layout() -> TableLayout {
        TableLayout {
            hours: vec![dec!(20), dec!(40)],
            net_weekly_incomes: vec![dec!(100), dec!(1200)],
            weeks_per_year: dec!(47),
        }
    }

    // =========================================================================
    // layout tests
    // =========================================================================

    #[test]
    fn default_layout_matches_reference_grid() {
        let layout = TableLayout::default();

        assert_eq!(layout.hours.first(), Some(&dec!(5)));
        assert_eq!(layout.hours.last(), Some(&dec!(40)));
        assert_eq!(layout.hours.len(), 8);
        assert_eq!(layout.net_weekly_incomes.first(), Some(&dec!(100)));
        assert_eq!(layout.net_weekly_incomes.last(), Some(&dec!(2500)));
        assert_eq!(layout.net_weekly_incomes.len(), 25);
        assert_eq!(layout.weeks_per_year, dec!(46));
    }

    #[test]
    fn row_label_shows_weekly_and_yearly_net() {
        assert_eq!(row_label(dec!(100)), Ok("($100, $5200)".to_string()));
        assert_eq!(row_label(dec!(2500)), Ok("($2500, $130000)".to_string()));
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn build_fills_header_and_cells() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);

        let table = WageTable::build(&inverter, &small_layout()).unwrap();

        assert_eq!(
            table.cells(),
            &[
                vec![" ".to_string(), "20".to_string(), "40".to_string()],
                vec!["($100, $5200)".to_string(), "$6".to_string(), "$3".to_string()],
                vec!["($1200, $62400)".to_string(), "$85".to_string(), "$42".to_string()],
            ]
        );
    }

    #[test]
    fn build_rejects_zero_hours() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let layout = TableLayout {
            hours: vec![dec!(0)],
            ..small_layout()
        };

        let result = WageTable::build(&inverter, &layout);

        assert_eq!(
            result,
            Err(TableError::WorkSchedule(WorkScheduleError::NonPositiveHours(
                dec!(0)
            )))
        );
    }

    #[test]
    fn build_reports_negative_net_income() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let layout = TableLayout {
            net_weekly_incomes: vec![dec!(-5)],
            ..small_layout()
        };

        let result = WageTable::build(&inverter, &layout);

        assert_eq!(
            result,
            Err(TableError::Tax {
                net_weekly: dec!(-5),
                source: TaxError::NegativeNetIncome(dec!(-260)),
            })
        );
    }

    #[test]
    fn build_rejects_hours_per_year_out_of_range() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let layout = TableLayout {
            hours: vec![dec!(100000000000000000000)],
            weeks_per_year: dec!(10000000000),
            ..small_layout()
        };

        let result = WageTable::build(&inverter, &layout);

        assert_eq!(
            result,
            Err(TableError::WorkSchedule(
                WorkScheduleError::HoursPerYearOutOfRange {
                    hours_per_week: dec!(100000000000000000000),
                    weeks_per_year: dec!(10000000000),
                }
            ))
        );
    }

    #[test]
    fn build_reports_overflowing_net_income() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let layout = TableLayout {
            net_weekly_incomes: vec![Decimal::MAX],
            ..small_layout()
        };

        let result = WageTable::build(&inverter, &layout);

        assert_eq!(
            result,
            Err(TableError::Tax {
                net_weekly: Decimal::MAX,
                source: TaxError::Overflow,
            })
        );
    }

    // =========================================================================
    // rendering tests
    // =========================================================================

    #[test]
    fn column_widths_pad_all_but_label_column() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let table = WageTable::build(&inverter, &small_layout()).unwrap();

        // "($1200, $62400)" is 15 wide; "$85" + 2; "$42" + 2.
        assert_eq!(table.column_widths(), vec![15, 5, 5]);
    }

    #[test]
    fn display_right_justifies_rows_under_banner() {
        let schedule = TaxSchedule::nz_2016();
        let inverter = IncomeInverter::new(&schedule);
        let table = WageTable::build(&inverter, &small_layout()).unwrap();

        let expected = concat!(
            "------------------------------------------------------\n",
            "Gross hourly income given                             \n",
            "net (weekly, yearly) income for 52 weeks per year and\n",
            "hours worked per week for 47 weeks per year \n",
            "------------------------------------------------------\n",
            "                  20   40\n",
            "  ($100, $5200)   $6   $3\n",
            "($1200, $62400)  $85  $42\n",
        );

        assert_eq!(table.to_string(), expected);
    }
}
