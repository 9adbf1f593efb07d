//! Loading pricing tables from CSV files.

mod loader;

pub use loader::{PricingRecord, PricingTableLoader, PricingTableLoaderError};
