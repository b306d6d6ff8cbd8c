use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single tier of a progressive tax schedule.
///
/// `rate` applies to the slice of income between the previous tier's cutoff
/// (or zero for the first tier) and `cutoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTier {
    pub cutoff: Decimal,
    pub rate: Decimal,
}

impl TaxTier {
    pub const fn new(
        cutoff: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { cutoff, rate }
    }
}

/// Errors raised when a list of tiers does not form a usable schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("tax schedule has no tiers")]
    Empty,

    #[error("tier {index} has a non-positive cutoff {cutoff}")]
    NonPositiveCutoff { index: usize, cutoff: Decimal },

    #[error("tier {index} cutoff {cutoff} does not exceed the previous cutoff")]
    CutoffsNotAscending { index: usize, cutoff: Decimal },

    #[error("tier {index} rate {rate} is outside [0, 1)")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// An ordered, validated table of tax tiers.
///
/// Cutoffs are strictly increasing and the last cutoff acts as an upper
/// sentinel: incomes at or beyond it are outside the schedule. A schedule can
/// only be obtained through [`TaxSchedule::new`] (or one of the built-in
/// schedules), so every calculation may rely on those invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    tiers: Vec<TaxTier>,
}

impl TaxSchedule {
    /// Cutoff used for the open-ended top tier, `10e12`.
    pub const UNBOUNDED_CUTOFF: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

    /// Builds a schedule after checking that cutoffs are positive and
    /// strictly ascending and that every rate lies in `[0, 1)`.
    pub fn new(tiers: Vec<TaxTier>) -> Result<Self, ScheduleError> {
        if tiers.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let mut previous = Decimal::ZERO;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.cutoff <= Decimal::ZERO {
                return Err(ScheduleError::NonPositiveCutoff {
                    index,
                    cutoff: tier.cutoff,
                });
            }
            if index > 0 && tier.cutoff <= previous {
                return Err(ScheduleError::CutoffsNotAscending {
                    index,
                    cutoff: tier.cutoff,
                });
            }
            if tier.rate < Decimal::ZERO || tier.rate >= Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: tier.rate,
                });
            }
            previous = tier.cutoff;
        }

        Ok(Self { tiers })
    }

    /// New Zealand income tax tiers for 2016-04-01 to 2017-03-31.
    pub fn nz_2016() -> Self {
        Self {
            tiers: vec![
                TaxTier::new(Decimal::new(14_000, 0), Decimal::new(105, 3)),
                TaxTier::new(Decimal::new(48_000, 0), Decimal::new(175, 3)),
                TaxTier::new(Decimal::new(70_000, 0), Decimal::new(3, 1)),
                TaxTier::new(Self::UNBOUNDED_CUTOFF, Decimal::new(33, 2)),
            ],
        }
    }

    pub fn tiers(&self) -> &[TaxTier] {
        &self.tiers
    }

    pub fn cutoffs(&self) -> Vec<Decimal> {
        self.tiers.iter().map(|t| t.cutoff).collect()
    }

    /// Highest marginal rate in the schedule.
    pub fn max_rate(&self) -> Decimal {
        self.tiers
            .iter()
            .map(|t| t.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Constant term of the tax line for tier `k`.
    ///
    /// Within tier `k` the tax on income `x` is `offset(k) + rate[k] * x`,
    /// where `offset(k)` telescopes the rate steps at every lower cutoff:
    /// `sum over i < k of (rate[i] - rate[i + 1]) * cutoff[i]`.
    pub(crate) fn tier_offset(
        &self,
        k: usize,
    ) -> Decimal {
        self.tiers
            .windows(2)
            .take(k)
            .map(|pair| (pair[0].rate - pair[1].rate) * pair[0].cutoff)
            .sum()
    }
}

impl TryFrom<Vec<TaxTier>> for TaxSchedule {
    type Error = ScheduleError;

    fn try_from(tiers: Vec<TaxTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}
