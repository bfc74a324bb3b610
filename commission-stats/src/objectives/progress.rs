//! Objective Progress Calculator
//!
//! Measures an objective against the sales of its period and owner. Sales are
//! re-filtered here, so callers may pass the whole history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Objective, ObjectiveMode, SaleRecord};
use std::collections::BTreeMap;

use crate::core::config::DEFAULT_PROGRESS_DISPLAY_CAP;
use crate::core::error::{ObjectiveIssue, StatsError, StatsResult};
use crate::sales::filter_period;
use crate::utils::money::percent_of;

/// Detail label for amount progress
pub const AMOUNT_LABEL: &str = "Montant";
/// Detail label for sale-count progress
pub const COUNT_LABEL: &str = "Ventes";

/// One measured dimension of an objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDetail {
    pub label: String,
    pub actual: Decimal,
    pub target: Decimal,
    /// Unclamped
    pub percent: f64,
}

impl ProgressDetail {
    fn new(label: impl Into<String>, actual: Decimal, target: Decimal) -> Self {
        Self {
            label: label.into(),
            actual,
            target,
            percent: percent_of(actual, target),
        }
    }
}

/// Progress toward one objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    pub objective_id: String,
    pub mode: ObjectiveMode,
    /// Display value, clamped at the calculator's cap
    pub progress_percent: f64,
    /// Exact value, used for bonus resolution
    pub raw_progress_percent: f64,
    pub details: Vec<ProgressDetail>,
    /// raw_progress_percent >= 100
    pub achieved: bool,
}

/// Progress calculator with a display cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveCalculator {
    display_cap: f64,
}

impl Default for ObjectiveCalculator {
    fn default() -> Self {
        Self {
            display_cap: DEFAULT_PROGRESS_DISPLAY_CAP,
        }
    }
}

impl ObjectiveCalculator {
    pub fn new(display_cap: f64) -> Self {
        Self { display_cap }
    }

    pub fn display_cap(&self) -> f64 {
        self.display_cap
    }

    /// Compute progress of `objective` over `sales`
    pub fn compute(&self, objective: &Objective, sales: &[SaleRecord]) -> StatsResult<ProgressResult> {
        validate_objective(objective)?;
        let scoped = sales_in_scope(objective, sales);
        Ok(self.measure(objective, &scoped))
    }

    /// Progress over sales already restricted to the objective's scope
    pub(crate) fn measure(&self, objective: &Objective, scoped: &[SaleRecord]) -> ProgressResult {
        let (raw, details) = match objective.mode {
            ObjectiveMode::Amount => {
                let detail = amount_detail(objective, scoped);
                (detail.percent, vec![detail])
            }
            ObjectiveMode::Count => {
                let detail = count_detail(objective, scoped);
                (detail.percent, vec![detail])
            }
            ObjectiveMode::ByType => by_type_progress(objective, scoped),
            ObjectiveMode::Mixed => {
                let amount = amount_detail(objective, scoped);
                let count = count_detail(objective, scoped);
                ((amount.percent + count.percent) / 2.0, vec![amount, count])
            }
            // rejected by validate_objective
            ObjectiveMode::Unrecognized => (0.0, Vec::new()),
        };

        let result = ProgressResult {
            objective_id: objective.id.clone(),
            mode: objective.mode,
            progress_percent: raw.min(self.display_cap),
            raw_progress_percent: raw,
            details,
            achieved: raw >= 100.0,
        };

        tracing::debug!(
            objective_id = %objective.id,
            mode = %objective.mode,
            sales = scoped.len(),
            raw_percent = raw,
            "Computed objective progress"
        );
        result
    }
}

/// Progress of `objective` with the default display cap
pub fn compute_objective_progress(
    objective: &Objective,
    sales: &[SaleRecord],
) -> StatsResult<ProgressResult> {
    ObjectiveCalculator::default().compute(objective, sales)
}

/// Reject objectives that cannot be measured
pub fn validate_objective(objective: &Objective) -> StatsResult<()> {
    let issue = if objective.period_start > objective.period_end {
        Some(ObjectiveIssue::InvertedPeriod)
    } else if objective.target_amount < Decimal::ZERO {
        Some(ObjectiveIssue::NegativeTarget)
    } else {
        match objective.mode {
            ObjectiveMode::Unrecognized => Some(ObjectiveIssue::UnknownMode),
            ObjectiveMode::ByType if objective.positive_type_targets().next().is_none() => {
                Some(ObjectiveIssue::EmptyTargets)
            }
            ObjectiveMode::Mixed
                if objective.target_amount.is_zero() && objective.target_count == 0 =>
            {
                Some(ObjectiveIssue::EmptyTargets)
            }
            _ => None,
        }
    };

    match issue {
        Some(issue) => Err(StatsError::invalid_objective(&objective.id, issue)),
        None => Ok(()),
    }
}

/// Active sales inside the objective's period that belong to its owner
pub fn sales_in_scope(objective: &Objective, sales: &[SaleRecord]) -> Vec<SaleRecord> {
    let mut scoped = filter_period(sales, objective.period_start, objective.period_end);
    scoped.retain(|sale| objective.applies_to(sale.employee_key()));
    scoped
}

fn amount_detail(objective: &Objective, sales: &[SaleRecord]) -> ProgressDetail {
    let actual: Decimal = sales.iter().map(|s| s.total_amount).sum();
    ProgressDetail::new(AMOUNT_LABEL, actual, objective.target_amount)
}

fn count_detail(objective: &Objective, sales: &[SaleRecord]) -> ProgressDetail {
    ProgressDetail::new(
        COUNT_LABEL,
        Decimal::from(sales.len()),
        Decimal::from(objective.target_count),
    )
}

/// Per-type line item counts; types without a positive target are ignored
fn by_type_progress(objective: &Objective, sales: &[SaleRecord]) -> (f64, Vec<ProgressDetail>) {
    let targets: BTreeMap<&str, u32> = objective
        .positive_type_targets()
        .map(|(id, target)| (id.as_str(), target))
        .collect();

    let mut actuals: BTreeMap<&str, (u32, Option<&str>)> = BTreeMap::new();
    for item in sales.iter().flat_map(|s| &s.line_items) {
        if !targets.contains_key(item.insurance_type_id.as_str()) {
            continue;
        }
        let entry = actuals
            .entry(item.insurance_type_id.as_str())
            .or_insert((0, None));
        entry.0 += 1;
        if entry.1.is_none() && !item.insurance_type_name.is_empty() {
            entry.1 = Some(item.insurance_type_name.as_str());
        }
    }

    let mut details = Vec::with_capacity(targets.len());
    let mut actual_sum = Decimal::ZERO;
    let mut target_sum = Decimal::ZERO;
    for (type_id, target) in targets {
        let (actual, name) = actuals.get(type_id).copied().unwrap_or((0, None));
        let actual = Decimal::from(actual);
        let target = Decimal::from(target);
        actual_sum += actual;
        target_sum += target;
        details.push(ProgressDetail::new(name.unwrap_or(type_id), actual, target));
    }

    (percent_of(actual_sum, target_sum), details)
}
