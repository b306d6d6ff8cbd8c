use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while evaluating or inverting a tax schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The income is at or beyond the schedule's top cutoff.
    #[error("income {0} lies beyond the last cutoff of the tax schedule")]
    IncomeAboveSchedule(Decimal),

    /// No non-negative gross income yields a negative net income.
    #[error("net income {0} is negative and has no gross equivalent")]
    NegativeNetIncome(Decimal),

    /// The root-finding bracket `[0, upper_bound]` does not reach the target.
    #[error("net income {net} is not reachable with gross income up to {upper_bound}")]
    RootNotBracketed { net: Decimal, upper_bound: Decimal },

    /// Bisection ran out of iterations before meeting its tolerance.
    #[error("gross income search did not converge after {iterations} iterations")]
    NoConvergence { iterations: u32 },

    /// An income conversion left the range of `Decimal`.
    #[error("income calculation overflowed the decimal range")]
    Overflow,
}
