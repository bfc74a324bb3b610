//! Objective Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How progress toward an objective is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectiveMode {
    /// Sum of sale amounts
    Amount,
    /// Number of sales
    Count,
    /// Number of line items per insurance type
    ByType,
    /// Mean of amount and count progress
    Mixed,
    /// Any mode string this build does not know
    #[serde(other)]
    Unrecognized,
}

impl ObjectiveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Count => "count",
            Self::ByType => "byType",
            Self::Mixed => "mixed",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales objective for one employee (or everyone when `employee_id` is None)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub employee_id: Option<String>,
    pub title: Option<String>,
    pub mode: ObjectiveMode,
    /// Inclusive
    pub period_start: NaiveDate,
    /// Inclusive
    pub period_end: NaiveDate,
    #[serde(default)]
    pub target_amount: Decimal,
    #[serde(default)]
    pub target_count: u32,
    /// insurance_type_id -> number of line items to sell
    #[serde(default)]
    pub target_by_type: BTreeMap<String, u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Objective {
    /// Whether the objective applies to the given employee key
    pub fn applies_to(&self, employee_key: &str) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|owner| owner == employee_key)
    }

    /// Targeted insurance types with a strictly positive target
    pub fn positive_type_targets(&self) -> impl Iterator<Item = (&String, u32)> {
        self.target_by_type
            .iter()
            .filter(|(_, target)| **target > 0)
            .map(|(id, target)| (id, *target))
    }
}
