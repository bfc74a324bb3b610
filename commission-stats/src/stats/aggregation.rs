//! Aggregator
//!
//! Reduces period-filtered sales into totals, optionally grouped by employee
//! or insurance type. Every function returns a fresh map; caller data is
//! only read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::SaleRecord;
use std::collections::BTreeMap;

use crate::sales::DateRange;

/// Count / amount / commission triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub count: u64,
    pub total_amount: Decimal,
    pub total_commission: Decimal,
}

impl Totals {
    fn add(&mut self, amount: Decimal, commission: Decimal) {
        self.count += 1;
        self.total_amount += amount;
        self.total_commission += commission;
    }

    /// Average sale amount, zero when there are no sales
    pub fn average_amount(&self) -> Decimal {
        if self.count == 0 {
            Decimal::ZERO
        } else {
            self.total_amount / Decimal::from(self.count)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Grouping key selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    /// Employee id, or employee name for legacy rows
    Employee,
    /// Insurance type id
    InsuranceType,
}

/// One group of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBucket {
    pub key: String,
    /// Label of the first record seen for this key
    pub label: String,
    pub totals: Totals,
}

/// Grouped aggregation, ordered by key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedTotals {
    pub group_by: GroupBy,
    pub buckets: BTreeMap<String, GroupBucket>,
}

impl GroupedTotals {
    fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            buckets: BTreeMap::new(),
        }
    }

    fn bucket_mut(&mut self, key: &str, label: &str) -> &mut Totals {
        &mut self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| GroupBucket {
                key: key.to_string(),
                label: label.to_string(),
                totals: Totals::default(),
            })
            .totals
    }

    pub fn get(&self, key: &str) -> Option<&GroupBucket> {
        self.buckets.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupBucket> {
        self.buckets.values()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Result of [`aggregate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AggregateResult {
    Total(Totals),
    Grouped(GroupedTotals),
}

impl AggregateResult {
    pub fn as_total(&self) -> Option<&Totals> {
        match self {
            Self::Total(totals) => Some(totals),
            Self::Grouped(_) => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&GroupedTotals> {
        match self {
            Self::Grouped(grouped) => Some(grouped),
            Self::Total(_) => None,
        }
    }

    pub fn into_grouped(self) -> Option<GroupedTotals> {
        match self {
            Self::Grouped(grouped) => Some(grouped),
            Self::Total(_) => None,
        }
    }
}

/// Aggregate sales, optionally grouped
pub fn aggregate(sales: &[SaleRecord], group_by: Option<GroupBy>) -> AggregateResult {
    match group_by {
        None => AggregateResult::Total(totals(sales)),
        Some(GroupBy::Employee) => AggregateResult::Grouped(aggregate_by_employee(sales)),
        Some(GroupBy::InsuranceType) => {
            AggregateResult::Grouped(aggregate_by_insurance_type(sales))
        }
    }
}

/// Ungrouped totals
pub fn totals(sales: &[SaleRecord]) -> Totals {
    let mut totals = Totals::default();
    for sale in sales {
        totals.add(sale.total_amount, sale.total_commission);
    }
    totals
}

/// Totals per employee (sale amount and sale total commission)
pub fn aggregate_by_employee(sales: &[SaleRecord]) -> GroupedTotals {
    let mut grouped = GroupedTotals::new(GroupBy::Employee);
    for sale in sales {
        grouped
            .bucket_mut(sale.employee_key(), &sale.employee_name)
            .add(sale.total_amount, sale.total_commission);
    }

    tracing::debug!(
        sales = sales.len(),
        employees = grouped.len(),
        "Aggregated sales by employee"
    );
    grouped
}

/// Totals per insurance type
///
/// A sale counts once for every distinct type it contains, with that type's
/// own line commission. The sale amount is attributed to each of its types,
/// so amounts across buckets can add up to more than the overall total.
pub fn aggregate_by_insurance_type(sales: &[SaleRecord]) -> GroupedTotals {
    let mut grouped = GroupedTotals::new(GroupBy::InsuranceType);
    for sale in sales {
        for (type_id, type_name, commission) in commission_per_type(sale) {
            grouped
                .bucket_mut(type_id, type_name)
                .add(sale.total_amount, commission);
        }
    }

    tracing::debug!(
        sales = sales.len(),
        insurance_types = grouped.len(),
        "Aggregated sales by insurance type"
    );
    grouped
}

/// Distinct insurance types of a sale with their summed line commission,
/// in first-seen order
fn commission_per_type(sale: &SaleRecord) -> Vec<(&str, &str, Decimal)> {
    let mut per_type: Vec<(&str, &str, Decimal)> = Vec::with_capacity(sale.line_items.len());
    for item in &sale.line_items {
        match per_type
            .iter_mut()
            .find(|(id, _, _)| *id == item.insurance_type_id)
        {
            Some(entry) => entry.2 += item.commission_amount,
            None => per_type.push((
                item.insurance_type_id.as_str(),
                item.insurance_type_name.as_str(),
                item.commission_amount,
            )),
        }
    }
    per_type
}

/// One day of a [`daily_series`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub totals: Totals,
}

/// Per-day totals over `range`, zero-filled for days without sales
pub fn daily_series(sales: &[SaleRecord], range: &DateRange) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for sale in sales.iter().filter(|s| range.contains(s.sale_date)) {
        by_day
            .entry(sale.sale_date)
            .or_default()
            .add(sale.total_amount, sale.total_commission);
    }

    range
        .iter_days()
        .map(|date| DailyPoint {
            date,
            totals: by_day.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}
