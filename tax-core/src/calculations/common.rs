//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by both the tax evaluator
//! and the income inverter, including tier lookup, rounding and tolerance
//! comparison.

use rust_decimal::{Decimal, RoundingStrategy};

/// Returns the least index `i` such that `x < cutoffs[i]`.
///
/// `cutoffs` must be strictly increasing. The boundary test is strict, so a
/// value exactly equal to a cutoff belongs to the following tier. Returns
/// `None` when no cutoff exceeds `x`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::mindex;
///
/// let cutoffs = [dec!(14000), dec!(48000), dec!(70000), dec!(10000000000000)];
///
/// assert_eq!(mindex(dec!(0), &cutoffs), Some(0));
/// assert_eq!(mindex(dec!(14000), &cutoffs), Some(1));
/// assert_eq!(mindex(dec!(70001), &cutoffs), Some(3));
/// assert_eq!(mindex(dec!(10000000000000), &cutoffs), None);
/// ```
pub fn mindex(
    x: Decimal,
    cutoffs: &[Decimal],
) -> Option<usize> {
    cutoffs.iter().position(|&cutoff| x < cutoff)
}

/// Rounds a decimal value to a whole currency unit, sending exact midpoints
/// to the nearest even unit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(84.66)), dec!(85));
/// assert_eq!(round_whole(dec!(12.5)), dec!(12));
/// assert_eq!(round_whole(dec!(13.5)), dec!(14));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Returns true when `a` and `b` differ by no more than `relative_tolerance`
/// times the larger of their magnitudes.
///
/// Two zeros always compare equal.
pub fn approx_eq(
    a: Decimal,
    b: Decimal,
    relative_tolerance: Decimal,
) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= relative_tolerance * scale
}
