//! Sales ingestion
//!
//! Raw rows become canonical records here, and period selection happens
//! here, before any aggregation.

pub mod catalog;
pub mod normalizer;
pub mod period;

pub use catalog::*;
pub use normalizer::*;
pub use period::*;
