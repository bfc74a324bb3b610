//! Data models
//!
//! Snapshot types handed to the engine by the storage layer.
//! Money is `Decimal`, dates are calendar dates, all IDs are `String`.

pub mod bonus_rule;
pub mod insurance_type;
pub mod objective;
pub mod sale;
pub mod sale_row;

// Re-exports
pub use bonus_rule::*;
pub use insurance_type::*;
pub use objective::*;
pub use sale::*;
pub use sale_row::*;
