//! Ranking Engine
//!
//! Leaderboard ordering over per-employee totals:
//! 1. total amount, descending
//! 2. total commission, descending
//! 3. label, ascending (case-insensitive)
//! 4. key, ascending
//!
//! The last step makes the order total, so identical input always yields
//! the same leaderboard.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::aggregation::{GroupBucket, GroupedTotals, Totals};

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: usize,
    pub employee_key: String,
    pub employee_label: String,
    pub totals: Totals,
}

/// Leaderboard comparator
pub fn compare_buckets(a: &GroupBucket, b: &GroupBucket) -> Ordering {
    b.totals
        .total_amount
        .cmp(&a.totals.total_amount)
        .then_with(|| b.totals.total_commission.cmp(&a.totals.total_commission))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.key.cmp(&b.key))
}

/// Order per-employee totals into a leaderboard
pub fn rank_employees(by_employee: &GroupedTotals) -> Vec<RankedEntry> {
    let mut buckets: Vec<&GroupBucket> = by_employee.iter().collect();
    buckets.sort_by(|a, b| compare_buckets(a, b));

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| RankedEntry {
            rank: index + 1,
            employee_key: bucket.key.clone(),
            employee_label: bucket.label.clone(),
            totals: bucket.totals,
        })
        .collect()
}

/// First `n` entries of a leaderboard
pub fn top_n(entries: &[RankedEntry], n: usize) -> Vec<RankedEntry> {
    entries.iter().take(n).cloned().collect()
}
