//! Progressive income tax calculations.
//!
//! This module provides the tax evaluator, which computes tax due on a gross
//! income, and the income inverter, which solves for the gross income that
//! leaves a target net income after tax.

pub mod common;
pub mod error;
pub mod evaluator;
pub mod inverter;

pub use error::TaxError;
pub use evaluator::{TaxAssessment, TaxEvaluator};
pub use inverter::{BisectionConfig, IncomeInverter, InversionStrategy};
