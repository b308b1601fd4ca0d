//! Fuel price dataset.
//!
//! Loads a flat CSV of truck-stop retail prices and keeps the cheapest
//! station per region (state code). The table is built once per
//! [`PriceStore`] and shared read-only afterwards.

mod error;
mod store;
mod table;

pub use error::PriceError;
pub use store::PriceStore;
pub use table::{PriceTable, RegionMatch, RegionPriceEntry};
