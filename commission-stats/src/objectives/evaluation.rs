//! Objective evaluation: progress plus the bonus tier it earns

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{BonusRule, Objective, SaleRecord};

use super::bonus::{bonus_amount, resolve_bonus};
use super::progress::{ObjectiveCalculator, ProgressResult, sales_in_scope, validate_objective};
use crate::core::error::StatsResult;
use crate::utils::money::round_money;

/// Progress of one objective with its resolved bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveEvaluation {
    pub progress: ProgressResult,
    /// In-scope commission the bonus applies to
    pub base_commission: Decimal,
    pub bonus_rule: Option<BonusRule>,
    /// Zero when no tier matches
    pub bonus_amount: Decimal,
}

impl ObjectiveCalculator {
    /// Progress and bonus of one objective
    ///
    /// The tier is resolved on the unclamped percentage.
    pub fn evaluate(
        &self,
        objective: &Objective,
        sales: &[SaleRecord],
        rules: &[BonusRule],
    ) -> StatsResult<ObjectiveEvaluation> {
        validate_objective(objective)?;
        let scoped = sales_in_scope(objective, sales);
        let progress = self.measure(objective, &scoped);

        let base_commission =
            round_money(scoped.iter().map(|sale| sale.total_commission).sum());
        let bonus_rule = resolve_bonus(progress.raw_progress_percent, rules).cloned();
        let bonus_amount = bonus_rule
            .as_ref()
            .map(|rule| bonus_amount(rule, base_commission))
            .unwrap_or_default();

        Ok(ObjectiveEvaluation {
            progress,
            base_commission,
            bonus_rule,
            bonus_amount,
        })
    }

    /// Evaluate every active objective, in input order
    ///
    /// The first invalid objective aborts the whole evaluation.
    pub fn evaluate_all(
        &self,
        objectives: &[Objective],
        sales: &[SaleRecord],
        rules: &[BonusRule],
    ) -> StatsResult<Vec<ObjectiveEvaluation>> {
        objectives
            .iter()
            .filter(|objective| objective.is_active)
            .map(|objective| self.evaluate(objective, sales, rules))
            .collect()
    }
}

/// [`ObjectiveCalculator::evaluate_all`] with the default display cap
pub fn evaluate_objectives(
    objectives: &[Objective],
    sales: &[SaleRecord],
    rules: &[BonusRule],
) -> StatsResult<Vec<ObjectiveEvaluation>> {
    ObjectiveCalculator::default().evaluate_all(objectives, sales, rules)
}
