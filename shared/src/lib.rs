//! Shared types for commission stats
//!
//! Domain models (sales, insurance types, objectives, bonus rules) and the
//! unified error system used across the workspace.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    BonusRule, InsuranceType, Objective, ObjectiveMode, RawSaleRow, SaleLineItem, SaleRecord,
    SaleStatus,
};
