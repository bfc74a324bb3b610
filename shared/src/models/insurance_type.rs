//! Insurance Type Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::SaleLineItem;

/// Insurance type (catalog entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceType {
    pub id: String,
    pub name: String,
    /// Reference commission for a new sale of this type
    pub commission_amount: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl InsuranceType {
    /// Line item for a new sale, snapshotting the current reference commission
    pub fn to_line_item(&self) -> SaleLineItem {
        SaleLineItem {
            insurance_type_id: self.id.clone(),
            insurance_type_name: self.name.clone(),
            commission_amount: self.commission_amount,
        }
    }
}
