//! Engine errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Why a raw sale row could not become a sale record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingDate,
    InvalidDate,
    NegativeCommission,
    NoLineItems,
    MissingEmployee,
}

impl MalformedReason {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingDate | Self::InvalidDate => ErrorCode::SaleDateInvalid,
            Self::NegativeCommission => ErrorCode::NegativeCommission,
            Self::NoLineItems => ErrorCode::SaleWithoutLineItems,
            Self::MissingEmployee => ErrorCode::RequiredField,
        }
    }
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingDate => "sale date is missing",
            Self::InvalidDate => "sale date cannot be parsed",
            Self::NegativeCommission => "line item commissions sum to a negative amount",
            Self::NoLineItems => "insurance item list is empty",
            Self::MissingEmployee => "neither employee id nor employee name is set",
        };
        f.write_str(text)
    }
}

/// Why an objective cannot be measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveIssue {
    UnknownMode,
    EmptyTargets,
    NegativeTarget,
    InvertedPeriod,
}

impl ObjectiveIssue {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownMode => ErrorCode::ObjectiveModeUnknown,
            Self::EmptyTargets => ErrorCode::ObjectiveTargetEmpty,
            Self::NegativeTarget => ErrorCode::ValueOutOfRange,
            Self::InvertedPeriod => ErrorCode::InvalidPeriod,
        }
    }
}

impl std::fmt::Display for ObjectiveIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::UnknownMode => "objective mode is not recognized",
            Self::EmptyTargets => "objective has no positive target",
            Self::NegativeTarget => "objective target amount is negative",
            Self::InvertedPeriod => "objective period ends before it starts",
        };
        f.write_str(text)
    }
}

/// Engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Malformed sale record {sale_id}: {reason}")]
    MalformedRecord {
        sale_id: String,
        reason: MalformedReason,
        /// Position in the input batch, when normalizing several rows
        row: Option<usize>,
    },

    #[error("Invalid objective {objective_id}: {issue}")]
    InvalidObjective {
        objective_id: String,
        issue: ObjectiveIssue,
    },

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type StatsResult<T> = Result<T, StatsError>;

impl StatsError {
    pub fn malformed(sale_id: impl Into<String>, reason: MalformedReason) -> Self {
        Self::MalformedRecord {
            sale_id: sale_id.into(),
            reason,
            row: None,
        }
    }

    pub fn invalid_objective(objective_id: impl Into<String>, issue: ObjectiveIssue) -> Self {
        Self::InvalidObjective {
            objective_id: objective_id.into(),
            issue,
        }
    }

    /// Attach the batch position to a malformed record error
    pub fn at_row(self, index: usize) -> Self {
        match self {
            Self::MalformedRecord {
                sale_id, reason, ..
            } => Self::MalformedRecord {
                sale_id,
                reason,
                row: Some(index),
            },
            other => other,
        }
    }

    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    pub fn is_invalid_objective(&self) -> bool {
        matches!(self, Self::InvalidObjective { .. })
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        let message = err.to_string();
        match err {
            StatsError::MalformedRecord {
                sale_id,
                reason,
                row,
            } => {
                let app = AppError::with_message(ErrorCode::MalformedRecord, message)
                    .with_detail("sale_id", sale_id)
                    .with_detail("reason_code", reason.error_code().code());
                match row {
                    Some(index) => app.with_detail("row", index),
                    None => app,
                }
            }
            StatsError::InvalidObjective {
                objective_id,
                issue,
            } => AppError::with_message(ErrorCode::InvalidObjective, message)
                .with_detail("objective_id", objective_id)
                .with_detail("reason_code", issue.error_code().code()),
            StatsError::InvalidPeriod(_) => {
                AppError::with_message(ErrorCode::InvalidPeriod, message)
            }
            StatsError::InvalidLineItem(_) => {
                AppError::with_message(ErrorCode::InvalidLineItem, message)
            }
            StatsError::Config(_) => AppError::with_message(ErrorCode::ConfigError, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = StatsError::malformed("s-9", MalformedReason::MissingDate);
        assert_eq!(
            err.to_string(),
            "Malformed sale record s-9: sale date is missing"
        );
        assert!(err.is_malformed_record());
        assert!(!err.is_invalid_objective());
    }

    #[test]
    fn test_at_row_only_touches_malformed_records() {
        let err = StatsError::malformed("s-9", MalformedReason::NoLineItems).at_row(4);
        assert!(matches!(
            err,
            StatsError::MalformedRecord { row: Some(4), .. }
        ));

        let other = StatsError::InvalidPeriod("x".into()).at_row(4);
        assert_eq!(other, StatsError::InvalidPeriod("x".into()));
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = StatsError::malformed("s-1", MalformedReason::NegativeCommission)
            .at_row(2)
            .into();
        assert_eq!(app.code, ErrorCode::MalformedRecord);
        let details = app.details.unwrap();
        assert_eq!(details.get("sale_id").unwrap(), "s-1");
        assert_eq!(details.get("row").unwrap(), 2);
        assert_eq!(details.get("reason_code").unwrap(), 4003);

        let app: AppError =
            StatsError::invalid_objective("obj-1", ObjectiveIssue::UnknownMode).into();
        assert_eq!(app.code, ErrorCode::InvalidObjective);
        assert_eq!(app.details.unwrap().get("reason_code").unwrap(), 5002);

        let app: AppError = StatsError::Config("bad cap".into()).into();
        assert_eq!(app.code, ErrorCode::ConfigError);
    }
}
