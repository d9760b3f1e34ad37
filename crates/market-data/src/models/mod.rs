//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `bar` - Normalized daily price record (DailyBar)
//! - `overview` - Company fundamentals passthrough (CompanyOverview)
//! - `range` - Requested look-back window and its date interval (PriceRange, DateWindow)

mod bar;
mod overview;
mod range;

pub use bar::DailyBar;
pub use overview::CompanyOverview;
pub use range::{DateWindow, PriceRange};
