//! Bonus Rule Model (achievement tiers)

use serde::{Deserialize, Serialize};

/// Bonus tier: achievement range -> bonus percent on top of base commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    pub id: String,
    pub name: String,
    /// Inclusive lower bound (percent)
    pub min_achievement_percent: f64,
    /// Exclusive upper bound (percent), None = unbounded
    pub max_achievement_percent: Option<f64>,
    /// Bonus percentage (10 = 10% of base commission)
    pub bonus_percent: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl BonusRule {
    /// Whether `[min, max)` contains the percentage
    pub fn contains(&self, achievement_percent: f64) -> bool {
        achievement_percent >= self.min_achievement_percent
            && self
                .max_achievement_percent
                .is_none_or(|max| achievement_percent < max)
    }

    /// Whether two tiers share at least one achievement value
    pub fn overlaps(&self, other: &BonusRule) -> bool {
        let self_below_other_max = other
            .max_achievement_percent
            .is_none_or(|max| self.min_achievement_percent < max);
        let other_below_self_max = self
            .max_achievement_percent
            .is_none_or(|max| other.min_achievement_percent < max);
        self_below_other_max && other_below_self_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rule(min: f64, max: Option<f64>) -> BonusRule {
        BonusRule {
            id: format!("rule-{}", min),
            name: "tier".to_string(),
            min_achievement_percent: min,
            max_achievement_percent: max,
            bonus_percent: 5.0,
            is_active: true,
        }
    }

    #[test]
    fn test_contains_min_inclusive_max_exclusive() {
        let rule = make_rule(100.0, Some(120.0));
        assert!(rule.contains(100.0));
        assert!(rule.contains(119.99));
        assert!(!rule.contains(120.0));
        assert!(!rule.contains(99.99));
    }

    #[test]
    fn test_contains_unbounded() {
        let rule = make_rule(120.0, None);
        assert!(rule.contains(120.0));
        assert!(rule.contains(10_000.0));
        assert!(!rule.contains(f64::NAN));
    }

    #[test]
    fn test_overlaps() {
        let bronze = make_rule(80.0, Some(100.0));
        let silver = make_rule(100.0, Some(120.0));
        let wide = make_rule(90.0, None);

        assert!(!bronze.overlaps(&silver));
        assert!(!silver.overlaps(&bronze));
        assert!(wide.overlaps(&bronze));
        assert!(wide.overlaps(&silver));
    }
}
