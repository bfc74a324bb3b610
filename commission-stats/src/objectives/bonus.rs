//! Bonus Rule Resolver
//!
//! Maps an achievement percentage onto a bonus tier. Tiers are half-open
//! `[min, max)` ranges; when several active tiers contain the value, the one
//! with the highest minimum wins, then the lowest id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::BonusRule;
use std::cmp::Ordering;

use crate::utils::money::apply_percent;

/// Two active tiers sharing part of their range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverlap {
    pub first_id: String,
    pub second_id: String,
}

/// Tier precedence: highest minimum first, then lowest id
fn precedence(a: &BonusRule, b: &BonusRule) -> Ordering {
    b.min_achievement_percent
        .total_cmp(&a.min_achievement_percent)
        .then_with(|| a.id.cmp(&b.id))
}

/// Resolve the tier for an (unclamped) achievement percentage
///
/// Returns None for non-finite input or when no active tier matches.
pub fn resolve_bonus(achievement_percent: f64, rules: &[BonusRule]) -> Option<&BonusRule> {
    if !achievement_percent.is_finite() {
        return None;
    }

    let mut matching: Vec<&BonusRule> = rules
        .iter()
        .filter(|rule| rule.is_active && rule.contains(achievement_percent))
        .collect();
    matching.sort_by(|a, b| precedence(a, b));

    let winner = matching.first().copied()?;
    if matching.len() > 1 {
        tracing::warn!(
            achievement_percent,
            winner = %winner.id,
            candidates = matching.len(),
            "Overlapping bonus tiers, highest minimum wins"
        );
    }
    Some(winner)
}

/// Bonus on top of a base commission, rounded to cents
pub fn bonus_amount(rule: &BonusRule, base_commission: Decimal) -> Decimal {
    apply_percent(base_commission, rule.bonus_percent)
}

/// Every pair of active tiers whose ranges overlap, ordered by id
pub fn find_overlaps(rules: &[BonusRule]) -> Vec<RuleOverlap> {
    let mut active: Vec<&BonusRule> = rules.iter().filter(|r| r.is_active).collect();
    active.sort_by(|a, b| a.id.cmp(&b.id));

    let mut overlaps = Vec::new();
    for (i, first) in active.iter().enumerate() {
        for second in &active[i + 1..] {
            if first.overlaps(second) {
                overlaps.push(RuleOverlap {
                    first_id: first.id.clone(),
                    second_id: second.id.clone(),
                });
            }
        }
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rule(id: &str, min: f64, max: Option<f64>, bonus: f64) -> BonusRule {
        BonusRule {
            id: id.to_string(),
            name: id.to_uppercase(),
            min_achievement_percent: min,
            max_achievement_percent: max,
            bonus_percent: bonus,
            is_active: true,
        }
    }

    fn tiers() -> Vec<BonusRule> {
        vec![
            rule("bronze", 80.0, Some(100.0), 5.0),
            rule("silver", 100.0, Some(120.0), 10.0),
            rule("gold", 120.0, None, 15.0),
        ]
    }

    fn resolved_id(pct: f64, rules: &[BonusRule]) -> Option<&str> {
        resolve_bonus(pct, rules).map(|r| r.id.as_str())
    }

    #[test]
    fn test_resolves_tiers() {
        let rules = tiers();
        assert_eq!(resolved_id(110.0, &rules), Some("silver"));
        assert_eq!(resolved_id(100.0, &rules), Some("silver"));
        assert_eq!(resolved_id(120.0, &rules), Some("gold"));
        assert_eq!(resolved_id(99.999, &rules), Some("bronze"));
        assert_eq!(resolved_id(500.0, &rules), Some("gold"));
    }

    #[test]
    fn test_below_every_tier() {
        assert_eq!(resolved_id(79.9, &tiers()), None);
        assert_eq!(resolved_id(0.0, &tiers()), None);
        assert_eq!(resolved_id(50.0, &[]), None);
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(resolved_id(f64::NAN, &tiers()), None);
        assert_eq!(resolved_id(f64::INFINITY, &tiers()), None);
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let mut rules = tiers();
        rules[1].is_active = false;
        assert_eq!(resolved_id(110.0, &rules), None);
    }

    #[test]
    fn test_overlap_highest_minimum_wins() {
        let mut rules = tiers();
        rules.push(rule("wide", 90.0, None, 2.0));
        assert_eq!(resolved_id(110.0, &rules), Some("silver"));
        assert_eq!(resolved_id(95.0, &rules), Some("wide"));
    }

    #[test]
    fn test_overlap_same_minimum_lowest_id_wins() {
        let rules = vec![
            rule("tier-b", 100.0, None, 10.0),
            rule("tier-a", 100.0, Some(200.0), 12.0),
        ];
        assert_eq!(resolved_id(150.0, &rules), Some("tier-a"));
    }

    #[test]
    fn test_bonus_amount() {
        let rules = tiers();
        let silver = resolve_bonus(110.0, &rules).unwrap();
        assert_eq!(bonus_amount(silver, dec!(250)), dec!(25));
        assert_eq!(bonus_amount(&rules[0], dec!(33.33)), dec!(1.67));
    }

    #[test]
    fn test_find_overlaps() {
        assert!(find_overlaps(&tiers()).is_empty());

        let mut rules = tiers();
        rules.push(rule("wide", 90.0, Some(105.0), 2.0));
        let overlaps = find_overlaps(&rules);
        assert_eq!(
            overlaps,
            vec![
                RuleOverlap {
                    first_id: "bronze".to_string(),
                    second_id: "wide".to_string(),
                },
                RuleOverlap {
                    first_id: "silver".to_string(),
                    second_id: "wide".to_string(),
                },
            ]
        );
    }
}
