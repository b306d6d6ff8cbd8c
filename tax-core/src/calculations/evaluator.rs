//! Progressive income tax evaluation.
//!
//! Within tier `k` the tax on a gross income `x` is linear:
//!
//! ```text
//! tax(x) = sum over i < k of (rate[i] - rate[i + 1]) * cutoff[i]  +  rate[k] * x
//! ```
//!
//! which telescopes the usual per-bracket sum
//! `sum of (min(x, cutoff[i]) - cutoff[i - 1]) * rate[i]` into one weighted
//! sum. Both forms are available; [`TaxEvaluator::bracket_tax`] computes the
//! per-bracket version.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxEvaluator;
//! use tax_core::TaxSchedule;
//!
//! let schedule = TaxSchedule::nz_2016();
//! let evaluator = TaxEvaluator::new(&schedule);
//!
//! let assessment = evaluator.tax_and_rate(dec!(14000)).unwrap();
//!
//! assert_eq!(assessment.tax, dec!(1470));
//! assert_eq!(assessment.effective_rate, dec!(0.105));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::mindex;
use crate::calculations::error::TaxError;
use crate::{TaxSchedule, WorkSchedule};

/// Tax due on an income together with the effective rate it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// Total tax due.
    pub tax: Decimal,

    /// Total tax divided by gross income.
    pub effective_rate: Decimal,
}

impl TaxAssessment {
    /// Assessment for income that attracts no tax.
    pub const NONE: TaxAssessment = TaxAssessment {
        tax: Decimal::ZERO,
        effective_rate: Decimal::ZERO,
    };
}

/// Evaluates tax due on gross income under a [`TaxSchedule`].
#[derive(Debug, Clone, Copy)]
pub struct TaxEvaluator<'a> {
    schedule: &'a TaxSchedule,
}

impl<'a> TaxEvaluator<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a TaxSchedule {
        self.schedule
    }

    /// Returns the tax due and the effective tax rate on a gross yearly income.
    ///
    /// Non-positive income is untaxed and reported with a zero rate. An
    /// income exactly equal to a cutoff is taxed at the marginal rate of the
    /// tier starting at that cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::IncomeAboveSchedule`] when the income reaches the
    /// schedule's last cutoff.
    pub fn tax_and_rate(
        &self,
        gross_yearly_income: Decimal,
    ) -> Result<TaxAssessment, TaxError> {
        if gross_yearly_income <= Decimal::ZERO {
            return Ok(TaxAssessment::NONE);
        }

        let k = self.marginal_tier(gross_yearly_income)?;
        let rate = self.schedule.tiers()[k].rate;
        let tax = self.schedule.tier_offset(k) + rate * gross_yearly_income;

        trace!(%gross_yearly_income, tier = k, %tax, "evaluated tax");

        Ok(TaxAssessment {
            tax,
            effective_rate: tax / gross_yearly_income,
        })
    }

    /// Returns the tax due and effective rate on the gross yearly income
    /// earned at `hourly_rate` over the given work schedule.
    pub fn tax_and_rate_hourly(
        &self,
        hourly_rate: Decimal,
        work: &WorkSchedule,
    ) -> Result<TaxAssessment, TaxError> {
        let gross_yearly_income = work.yearly_gross(hourly_rate).ok_or(TaxError::Overflow)?;
        self.tax_and_rate(gross_yearly_income)
    }

    /// Tax due computed bracket by bracket.
    ///
    /// Accumulates `(min(income, cutoff) - previous_cutoff) * rate` for each
    /// tier until the first tier whose cutoff exceeds the income. Agrees with
    /// [`TaxEvaluator::tax_and_rate`] for every income.
    pub fn bracket_tax(
        &self,
        gross_yearly_income: Decimal,
    ) -> Result<Decimal, TaxError> {
        if gross_yearly_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut tax = Decimal::ZERO;
        let mut previous_cutoff = Decimal::ZERO;
        for tier in self.schedule.tiers() {
            tax += (gross_yearly_income.min(tier.cutoff) - previous_cutoff) * tier.rate;
            if gross_yearly_income < tier.cutoff {
                return Ok(tax);
            }
            previous_cutoff = tier.cutoff;
        }

        Err(TaxError::IncomeAboveSchedule(gross_yearly_income))
    }

    /// Gross income less the tax due on it.
    pub fn net_income(
        &self,
        gross_yearly_income: Decimal,
    ) -> Result<Decimal, TaxError> {
        let assessment = self.tax_and_rate(gross_yearly_income)?;
        Ok(gross_yearly_income - assessment.tax)
    }

    fn marginal_tier(
        &self,
        income: Decimal,
    ) -> Result<usize, TaxError> {
        mindex(income, &self.schedule.cutoffs()).ok_or(TaxError::IncomeAboveSchedule(income))
    }
}
