//! Commission Engine
//!
//! Facade over the pipeline: normalize → filter → aggregate → rank, plus
//! objective evaluation with the configured display cap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{BonusRule, Objective, RawSaleRow, SaleRecord};

use crate::core::{Config, StatsResult};
use crate::objectives::{ObjectiveCalculator, ObjectiveEvaluation};
use crate::sales::{DateRange, Normalizer, PeriodPreset, filter_range};
use crate::stats::{
    DailyPoint, GroupedTotals, RankedEntry, Totals, TrendResult, aggregate_by_employee,
    aggregate_by_insurance_type, compare_trend, daily_series, rank_employees, top_n, totals,
};
use crate::utils::time::today_in;

/// Dashboard figures for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub range: DateRange,
    pub totals: Totals,
    /// Truncated to the configured leaderboard size
    pub leaderboard: Vec<RankedEntry>,
    pub by_insurance_type: GroupedTotals,
    /// Against the window of equal length right before `range`
    pub trend: TrendResult,
    pub daily: Vec<DailyPoint>,
}

/// One employee's figures for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_key: String,
    /// None when the employee has no sale in the period
    pub employee_label: Option<String>,
    pub range: DateRange,
    pub totals: Totals,
    /// Position on the full (untruncated) leaderboard
    pub rank: Option<usize>,
    pub by_insurance_type: GroupedTotals,
    pub trend: TrendResult,
}

/// Commission statistics engine
#[derive(Debug, Clone)]
pub struct CommissionEngine {
    config: Config,
    normalizer: Normalizer,
    calculator: ObjectiveCalculator,
}

impl CommissionEngine {
    pub fn new(config: Config) -> Self {
        Self {
            normalizer: Normalizer::new(config.timezone),
            calculator: ObjectiveCalculator::new(config.progress_display_cap),
            config,
        }
    }

    /// Build an engine after validating `config`
    pub fn try_new(config: Config) -> StatsResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize raw rows in the configured time zone
    pub fn ingest(&self, rows: &[RawSaleRow]) -> StatsResult<Vec<SaleRecord>> {
        let sales = self.normalizer.normalize_all(rows)?;
        tracing::debug!(rows = rows.len(), timezone = %self.config.timezone, "Ingested sale rows");
        Ok(sales)
    }

    /// Totals, leaderboard, type breakdown, trend and daily series for `range`
    pub fn period_report(&self, sales: &[SaleRecord], range: &DateRange) -> PeriodReport {
        let current = filter_range(sales, range);
        let previous = filter_range(sales, &range.previous());

        let current_totals = totals(&current);
        let leaderboard = rank_employees(&aggregate_by_employee(&current));

        let report = PeriodReport {
            range: *range,
            totals: current_totals,
            leaderboard: top_n(&leaderboard, self.config.leaderboard_size),
            by_insurance_type: aggregate_by_insurance_type(&current),
            trend: compare_trend(&current_totals, &totals(&previous)),
            daily: daily_series(&current, range),
        };

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            sales = report.totals.count,
            employees = leaderboard.len(),
            "Built period report"
        );
        report
    }

    /// [`Self::period_report`] for a preset ending today in the reporting zone
    ///
    /// `Custom` has no bounds of its own and is rejected with `InvalidPeriod`.
    pub fn preset_report(
        &self,
        sales: &[SaleRecord],
        preset: PeriodPreset,
    ) -> StatsResult<PeriodReport> {
        let today = today_in(self.config.timezone);
        let range = DateRange::for_preset(preset, today, None)?;
        Ok(self.period_report(sales, &range))
    }

    /// Figures of a single employee (by aggregation key) for `range`
    pub fn employee_summary(
        &self,
        sales: &[SaleRecord],
        employee_key: &str,
        range: &DateRange,
    ) -> EmployeeSummary {
        let current = filter_range(sales, range);
        let leaderboard = rank_employees(&aggregate_by_employee(&current));
        let entry = leaderboard.iter().find(|e| e.employee_key == employee_key);

        let own: Vec<SaleRecord> = current
            .into_iter()
            .filter(|sale| sale.employee_key() == employee_key)
            .collect();
        let own_previous: Vec<SaleRecord> = filter_range(sales, &range.previous())
            .into_iter()
            .filter(|sale| sale.employee_key() == employee_key)
            .collect();

        let own_totals = totals(&own);
        EmployeeSummary {
            employee_key: employee_key.to_string(),
            employee_label: entry.map(|e| e.employee_label.clone()),
            range: *range,
            totals: own_totals,
            rank: entry.map(|e| e.rank),
            by_insurance_type: aggregate_by_insurance_type(&own),
            trend: compare_trend(&own_totals, &totals(&own_previous)),
        }
    }

    /// Progress and bonus of one objective
    ///
    /// The tier is resolved on the unclamped percentage and the bonus applies
    /// to the in-period commission of the objective's owner.
    pub fn evaluate_objective(
        &self,
        objective: &Objective,
        sales: &[SaleRecord],
        rules: &[BonusRule],
    ) -> StatsResult<ObjectiveEvaluation> {
        self.calculator.evaluate(objective, sales, rules)
    }

    /// Every active objective, in input order
    pub fn evaluate_objectives(
        &self,
        objectives: &[Objective],
        sales: &[SaleRecord],
        rules: &[BonusRule],
    ) -> StatsResult<Vec<ObjectiveEvaluation>> {
        let evaluations = self.calculator.evaluate_all(objectives, sales, rules)?;
        let total_bonus: Decimal = evaluations.iter().map(|e| e.bonus_amount).sum();
        tracing::debug!(
            objectives = evaluations.len(),
            total_bonus = %total_bonus,
            "Evaluated objectives"
        );
        Ok(evaluations)
    }
}

impl Default for CommissionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
