//! Sales statistics
//!
//! Aggregation, leaderboards and period-over-period trends over sales that
//! already went through the period filter.

pub mod aggregation;
pub mod ranking;
pub mod trend;

pub use aggregation::*;
pub use ranking::*;
pub use trend::*;
