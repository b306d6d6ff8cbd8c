//! Gross income required to reach a target net income.
//!
//! Net income `x - tax(x)` is continuous, piecewise linear and strictly
//! increasing in gross income `x` (every marginal rate is below one), so each
//! net income has exactly one gross preimage. Two strategies find it:
//!
//! - [`InversionStrategy::ClosedForm`] maps every cutoff to its net value,
//!   locates the tier holding the target and solves that tier's linear
//!   equation directly.
//! - [`InversionStrategy::Bisection`] searches a bracket of gross incomes by
//!   repeatedly evaluating the tax schedule. It makes no use of linearity and
//!   is kept for schedules where the closed form is not trusted.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::IncomeInverter;
//! use tax_core::{TaxSchedule, WorkSchedule};
//!
//! let schedule = TaxSchedule::nz_2016();
//! let inverter = IncomeInverter::new(&schedule);
//!
//! let gross = inverter.gross_yearly_income(dec!(50000)).unwrap();
//! assert_eq!(gross.round_dp(2), dec!(61457.14));
//!
//! let work = WorkSchedule::new(dec!(20), dec!(47)).unwrap();
//! let hourly = inverter.gross_hourly_rate(dec!(1200), &work).unwrap();
//! assert_eq!(hourly.round_dp(2), dec!(84.66));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calculations::common::{approx_eq, mindex};
use crate::calculations::error::TaxError;
use crate::calculations::evaluator::TaxEvaluator;
use crate::{NET_WEEKS_PER_YEAR, TaxSchedule, WorkSchedule};

/// Search parameters for [`InversionStrategy::Bisection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectionConfig {
    /// Largest gross income searched. The lower bound is always zero.
    pub upper_bound: Decimal,

    /// Relative tolerance on the recovered net income.
    pub tolerance: Decimal,

    /// Iteration cap before giving up with [`TaxError::NoConvergence`].
    pub max_iterations: u32,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            upper_bound: Decimal::new(1_000_000_000, 0),
            tolerance: Decimal::new(1, 6),
            max_iterations: 200,
        }
    }
}

/// How [`IncomeInverter`] solves for gross income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InversionStrategy {
    #[default]
    ClosedForm,
    Bisection(BisectionConfig),
}

/// Solves for the gross income that leaves a given net income after tax.
#[derive(Debug, Clone, Copy)]
pub struct IncomeInverter<'a> {
    evaluator: TaxEvaluator<'a>,
    strategy: InversionStrategy,
}

impl<'a> IncomeInverter<'a> {
    /// Creates an inverter using the closed-form strategy.
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self::with_strategy(schedule, InversionStrategy::ClosedForm)
    }

    pub fn with_strategy(
        schedule: &'a TaxSchedule,
        strategy: InversionStrategy,
    ) -> Self {
        Self {
            evaluator: TaxEvaluator::new(schedule),
            strategy,
        }
    }

    pub fn evaluator(&self) -> &TaxEvaluator<'a> {
        &self.evaluator
    }

    pub fn strategy(&self) -> InversionStrategy {
        self.strategy
    }

    /// Returns the gross yearly income whose net income after tax equals
    /// `net_yearly_income`.
    ///
    /// # Errors
    ///
    /// - [`TaxError::NegativeNetIncome`] if the target is negative.
    /// - [`TaxError::IncomeAboveSchedule`] if the target lies beyond the net
    ///   value of the schedule's last cutoff.
    /// - [`TaxError::RootNotBracketed`] or [`TaxError::NoConvergence`] when
    ///   bisection cannot reach the target.
    pub fn gross_yearly_income(
        &self,
        net_yearly_income: Decimal,
    ) -> Result<Decimal, TaxError> {
        if net_yearly_income < Decimal::ZERO {
            return Err(TaxError::NegativeNetIncome(net_yearly_income));
        }
        if net_yearly_income.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let gross = match self.strategy {
            InversionStrategy::ClosedForm => self.closed_form(net_yearly_income)?,
            InversionStrategy::Bisection(config) => self.bisect(net_yearly_income, &config)?,
        };

        debug!(
            %net_yearly_income,
            %gross,
            strategy = ?self.strategy,
            "solved gross income"
        );
        Ok(gross)
    }

    /// Returns the gross hourly rate needed to take home `net_weekly_income`
    /// every one of the 52 calendar weeks while only being paid for the
    /// hours and weeks in `work`.
    pub fn gross_hourly_rate(
        &self,
        net_weekly_income: Decimal,
        work: &WorkSchedule,
    ) -> Result<Decimal, TaxError> {
        let net_yearly = net_weekly_income
            .checked_mul(NET_WEEKS_PER_YEAR)
            .ok_or(TaxError::Overflow)?;
        let gross_yearly = self.gross_yearly_income(net_yearly)?;
        work.hourly_rate(gross_yearly).ok_or(TaxError::Overflow)
    }

    /// Net income at each cutoff of the schedule.
    ///
    /// Net income is continuous, so the value at a cutoff is taken from the
    /// tier that ends there. That keeps the sentinel cutoff usable even
    /// though it lies outside the schedule.
    pub fn inverse_cutoffs(&self) -> Vec<Decimal> {
        let schedule = self.evaluator.schedule();
        schedule
            .tiers()
            .iter()
            .enumerate()
            .map(|(k, tier)| tier.cutoff - (schedule.tier_offset(k) + tier.rate * tier.cutoff))
            .collect()
    }

    fn closed_form(
        &self,
        net: Decimal,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.evaluator.schedule();
        let k = mindex(net, &self.inverse_cutoffs()).ok_or(TaxError::IncomeAboveSchedule(net))?;
        let rate = schedule.tiers()[k].rate;

        Ok((net + schedule.tier_offset(k)) / (Decimal::ONE - rate))
    }

    fn bisect(
        &self,
        net: Decimal,
        config: &BisectionConfig,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.evaluator.schedule();
        let top = schedule.tiers().last().map_or(Decimal::ZERO, |tier| tier.cutoff);

        // The evaluator rejects the top cutoff itself, so the reachable net
        // income comes from the inverse cutoffs.
        let top_net = self.inverse_cutoffs().last().copied().unwrap_or(Decimal::ZERO);
        if net >= top_net {
            return Err(TaxError::IncomeAboveSchedule(net));
        }
        if config.upper_bound < top && self.evaluator.net_income(config.upper_bound)? < net {
            return Err(TaxError::RootNotBracketed {
                net,
                upper_bound: config.upper_bound,
            });
        }

        let mut low = Decimal::ZERO;
        let mut high = config.upper_bound.min(top);

        for iteration in 0..config.max_iterations {
            let mid = (low + high) / Decimal::TWO;
            // Bracket exhausted at decimal precision.
            if mid <= low || mid >= high {
                return Err(TaxError::NoConvergence {
                    iterations: iteration,
                });
            }

            let mid_net = self.evaluator.net_income(mid)?;
            trace!(iteration, %mid, %mid_net, "bisection step");

            if approx_eq(mid_net, net, config.tolerance) {
                return Ok(mid);
            }
            if mid_net < net {
                low = mid;
            } else {
                high = mid;
            }
        }

        Err(TaxError::NoConvergence {
            iterations: config.max_iterations,
        })
    }
}
