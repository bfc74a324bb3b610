//! Trend Comparator
//!
//! Signed deltas between two periods (current - previous).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregation::Totals;
use crate::utils::money::delta_percent;

/// Direction of a change, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    fn of(delta: Decimal) -> Self {
        if delta > Decimal::ZERO {
            Self::Up
        } else if delta < Decimal::ZERO {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Period-over-period comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub count_delta: i64,
    pub count_delta_percent: f64,
    pub amount_delta: Decimal,
    pub amount_delta_percent: f64,
    pub commission_delta: Decimal,
    pub commission_delta_percent: f64,
}

impl TrendResult {
    pub fn commission_direction(&self) -> TrendDirection {
        TrendDirection::of(self.commission_delta)
    }

    pub fn count_direction(&self) -> TrendDirection {
        TrendDirection::of(Decimal::from(self.count_delta))
    }
}

/// Compare two aggregate triples
///
/// Percent change is 100 when the previous value is zero and the current
/// one is positive, 0 when both are zero.
pub fn compare_trend(current: &Totals, previous: &Totals) -> TrendResult {
    let current_count = Decimal::from(current.count);
    let previous_count = Decimal::from(previous.count);

    TrendResult {
        count_delta: current.count as i64 - previous.count as i64,
        count_delta_percent: delta_percent(current_count, previous_count),
        amount_delta: current.total_amount - previous.total_amount,
        amount_delta_percent: delta_percent(current.total_amount, previous.total_amount),
        commission_delta: current.total_commission - previous.total_commission,
        commission_delta_percent: delta_percent(
            current.total_commission,
            previous.total_commission,
        ),
    }
}
