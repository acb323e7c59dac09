//! Local catalog and pricing data.

mod catalog;
mod pricing;

pub use catalog::{CATALOG, TestConfig, config_for};
pub use pricing::{PRICE_NEW, PRICE_OLD, format_brl};
