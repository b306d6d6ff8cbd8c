//! Tax tier configuration loading.

mod loader;

pub use loader::{TaxTierLoader, TaxTierLoaderError, TaxTierRecord};
