use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Work weeks per year counting 4 weeks paid leave and 2 weeks paid holiday.
pub const DEFAULT_WEEKS_PER_YEAR: Decimal = Decimal::from_parts(46, 0, 0, false, 0);

/// Calendar weeks over which net income is spread, regardless of weeks worked.
pub const NET_WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkScheduleError {
    #[error("hours per week must be positive, got {0}")]
    NonPositiveHours(Decimal),

    #[error("weeks per year must be positive, got {0}")]
    NonPositiveWeeks(Decimal),

    #[error("{hours_per_week} hours per week over {weeks_per_year} weeks is out of range")]
    HoursPerYearOutOfRange {
        hours_per_week: Decimal,
        weeks_per_year: Decimal,
    },
}

/// Hours worked per week and paid working weeks per year.
///
/// Only built through [`WorkSchedule::new`], so the hours per year are always
/// positive and representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkSchedule {
    hours_per_week: Decimal,
    weeks_per_year: Decimal,
    hours_per_year: Decimal,
}

impl WorkSchedule {
    pub fn new(
        hours_per_week: Decimal,
        weeks_per_year: Decimal,
    ) -> Result<Self, WorkScheduleError> {
        if hours_per_week <= Decimal::ZERO {
            return Err(WorkScheduleError::NonPositiveHours(hours_per_week));
        }
        if weeks_per_year <= Decimal::ZERO {
            return Err(WorkScheduleError::NonPositiveWeeks(weeks_per_year));
        }
        let hours_per_year = hours_per_week
            .checked_mul(weeks_per_year)
            .filter(|hours| !hours.is_zero())
            .ok_or(WorkScheduleError::HoursPerYearOutOfRange {
                hours_per_week,
                weeks_per_year,
            })?;
        Ok(Self {
            hours_per_week,
            weeks_per_year,
            hours_per_year,
        })
    }

    /// A schedule of `hours_per_week` over the default 46 working weeks.
    pub fn with_default_weeks(hours_per_week: Decimal) -> Result<Self, WorkScheduleError> {
        Self::new(hours_per_week, DEFAULT_WEEKS_PER_YEAR)
    }

    pub fn hours_per_week(&self) -> Decimal {
        self.hours_per_week
    }

    pub fn weeks_per_year(&self) -> Decimal {
        self.weeks_per_year
    }

    pub fn hours_per_year(&self) -> Decimal {
        self.hours_per_year
    }

    /// Gross yearly income earned at `hourly_rate`, or `None` on overflow.
    pub fn yearly_gross(
        &self,
        hourly_rate: Decimal,
    ) -> Option<Decimal> {
        hourly_rate.checked_mul(self.hours_per_year)
    }

    /// Hourly rate that earns `yearly_gross` over the schedule, or `None` on
    /// overflow.
    pub fn hourly_rate(
        &self,
        yearly_gross: Decimal,
    ) -> Option<Decimal> {
        yearly_gross.checked_div(self.hours_per_year)
    }
}
