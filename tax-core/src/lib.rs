pub mod calculations;
pub mod models;

pub use calculations::{IncomeInverter, TaxAssessment, TaxError, TaxEvaluator};
pub use models::*;
