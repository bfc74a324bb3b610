//! Unified error codes for commission stats
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Sale record errors
//! - 5xxx: Objective errors
//! - 6xxx: Bonus rule / insurance catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so callers in other
/// languages can match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Sale ====================
    /// Raw sale row cannot be reconciled into a sale record
    MalformedRecord = 4001,
    /// Sale date missing or unparseable
    SaleDateInvalid = 4002,
    /// Sale line items sum to a negative commission
    NegativeCommission = 4003,
    /// Sale carries no line items
    SaleWithoutLineItems = 4004,

    // ==================== 5xxx: Objective ====================
    /// Objective cannot be measured
    InvalidObjective = 5001,
    /// Objective mode is not recognized
    ObjectiveModeUnknown = 5002,
    /// Objective has no usable target
    ObjectiveTargetEmpty = 5003,
    /// Reporting period is invalid
    InvalidPeriod = 5101,

    // ==================== 6xxx: Bonus / Catalog ====================
    /// Bonus rule not found
    BonusRuleNotFound = 6001,
    /// Insurance type not found
    InsuranceTypeNotFound = 6101,
    /// Insurance type is deactivated
    InsuranceTypeInactive = 6102,
    /// Line item cannot be built
    InvalidLineItem = 6103,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Sale
            ErrorCode::MalformedRecord => "Sale record is malformed",
            ErrorCode::SaleDateInvalid => "Sale date is missing or invalid",
            ErrorCode::NegativeCommission => "Sale commission cannot be negative",
            ErrorCode::SaleWithoutLineItems => "Sale has no insurance line items",

            // Objective
            ErrorCode::InvalidObjective => "Objective is invalid",
            ErrorCode::ObjectiveModeUnknown => "Objective mode is not recognized",
            ErrorCode::ObjectiveTargetEmpty => "Objective has no target to measure",
            ErrorCode::InvalidPeriod => "Reporting period is invalid",

            // Bonus / Catalog
            ErrorCode::BonusRuleNotFound => "Bonus rule not found",
            ErrorCode::InsuranceTypeNotFound => "Insurance type not found",
            ErrorCode::InsuranceTypeInactive => "Insurance type is inactive",
            ErrorCode::InvalidLineItem => "Line item is invalid",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Sale
            4001 => Ok(ErrorCode::MalformedRecord),
            4002 => Ok(ErrorCode::SaleDateInvalid),
            4003 => Ok(ErrorCode::NegativeCommission),
            4004 => Ok(ErrorCode::SaleWithoutLineItems),

            // Objective
            5001 => Ok(ErrorCode::InvalidObjective),
            5002 => Ok(ErrorCode::ObjectiveModeUnknown),
            5003 => Ok(ErrorCode::ObjectiveTargetEmpty),
            5101 => Ok(ErrorCode::InvalidPeriod),

            // Bonus / Catalog
            6001 => Ok(ErrorCode::BonusRuleNotFound),
            6101 => Ok(ErrorCode::InsuranceTypeNotFound),
            6102 => Ok(ErrorCode::InsuranceTypeInactive),
            6103 => Ok(ErrorCode::InvalidLineItem),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
