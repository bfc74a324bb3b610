//! Sale Model (canonical sale record)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Key/label used for line items whose insurance type reference is missing
pub const UNASSIGNED_INSURANCE_TYPE: &str = "unassigned";

/// Sale status (soft delete flag)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Active,
    Deleted,
}

/// One `(insurance type, commission)` pair within a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub insurance_type_id: String,
    pub insurance_type_name: String,
    /// Commission attached when the sale was recorded (authoritative)
    pub commission_amount: Decimal,
}

/// Canonical sale record
///
/// Built only by the normalizer; `total_commission` always equals the sum of
/// `line_items[].commission_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    /// Calendar date in the reporting time zone
    pub sale_date: NaiveDate,
    pub employee_id: Option<String>,
    pub employee_name: String,
    pub client_name: Option<String>,
    /// Ordered line items, never empty
    pub line_items: Vec<SaleLineItem>,
    /// Gross sale amount (independent of commission)
    pub total_amount: Decimal,
    pub total_commission: Decimal,
    #[serde(default)]
    pub status: SaleStatus,
}

impl SaleRecord {
    /// Aggregation key: employee id, falling back to the name for legacy rows
    pub fn employee_key(&self) -> &str {
        self.employee_id.as_deref().unwrap_or(&self.employee_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == SaleStatus::Active
    }

    /// Sum of line item commissions
    pub fn line_commission_sum(&self) -> Decimal {
        self.line_items.iter().map(|i| i.commission_amount).sum()
    }

    /// Whether any line item references the given insurance type
    pub fn has_insurance_type(&self, insurance_type_id: &str) -> bool {
        self.line_items
            .iter()
            .any(|i| i.insurance_type_id == insurance_type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_sale(employee_id: Option<&str>) -> SaleRecord {
        SaleRecord {
            id: "s-1".to_string(),
            sale_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            employee_id: employee_id.map(String::from),
            employee_name: "Alice Martin".to_string(),
            client_name: None,
            line_items: vec![
                SaleLineItem {
                    insurance_type_id: "auto".to_string(),
                    insurance_type_name: "Auto".to_string(),
                    commission_amount: dec!(12.50),
                },
                SaleLineItem {
                    insurance_type_id: "home".to_string(),
                    insurance_type_name: "Habitation".to_string(),
                    commission_amount: dec!(7.50),
                },
            ],
            total_amount: dec!(200),
            total_commission: dec!(20.00),
            status: SaleStatus::Active,
        }
    }

    #[test]
    fn test_employee_key_prefers_id() {
        assert_eq!(make_sale(Some("emp-1")).employee_key(), "emp-1");
        assert_eq!(make_sale(None).employee_key(), "Alice Martin");
    }

    #[test]
    fn test_line_commission_sum() {
        let sale = make_sale(None);
        assert_eq!(sale.line_commission_sum(), sale.total_commission);
        assert!(sale.has_insurance_type("home"));
        assert!(!sale.has_insurance_type("life"));
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&SaleStatus::Deleted).unwrap(),
            "\"deleted\""
        );
        let status: SaleStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, SaleStatus::Active);
        assert_eq!(SaleStatus::default(), SaleStatus::Active);
    }
}
