//! Objectives and bonus tiers

pub mod bonus;
pub mod evaluation;
pub mod progress;

pub use bonus::*;
pub use evaluation::*;
pub use progress::*;
