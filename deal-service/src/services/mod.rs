pub mod deal_finder;
pub mod metrics;
pub mod providers;

pub use deal_finder::{DealError, DealFinder, DealQuery};
