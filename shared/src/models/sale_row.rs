//! Raw sale rows as returned by the hosted backend
//!
//! Two shapes coexist in the sales table:
//! - legacy rows with one flat insurance type and `commission_amount`
//! - multi-insurance rows carrying an `insurance_items` array
//!
//! Both are resolved once into [`super::SaleRecord`] by the normalizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use super::sale::SaleStatus;

/// Legacy single-insurance row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacySaleRow {
    pub id: String,
    /// `YYYY-MM-DD` or an ISO 8601 timestamp
    pub sale_date: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub amount: Decimal,
    pub insurance_type_id: Option<String>,
    pub insurance_type_name: Option<String>,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub commission_amount: Decimal,
    #[serde(default)]
    pub status: SaleStatus,
}

/// Line item of a multi-insurance row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub insurance_type_id: String,
    #[serde(default, alias = "name")]
    pub insurance_type_name: String,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub commission_amount: Decimal,
}

/// Multi-insurance row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLineSaleRow {
    pub id: String,
    pub sale_date: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub amount: Decimal,
    pub insurance_items: Vec<RawLineItem>,
    #[serde(default)]
    pub status: SaleStatus,
}

/// Missing or `null` money columns read as zero
fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw sale row in either shape
///
/// Deserialization dispatches on a non-empty `insurance_items` array, so a
/// broken multi-line row fails loudly instead of degrading into a legacy
/// row. A null or empty array (the column default) reads as a legacy row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawSaleRow {
    MultiLine(MultiLineSaleRow),
    Legacy(LegacySaleRow),
}

impl RawSaleRow {
    pub fn id(&self) -> &str {
        match self {
            Self::MultiLine(row) => &row.id,
            Self::Legacy(row) => &row.id,
        }
    }

    pub fn is_multi_line(&self) -> bool {
        matches!(self, Self::MultiLine(_))
    }
}

impl From<LegacySaleRow> for RawSaleRow {
    fn from(row: LegacySaleRow) -> Self {
        Self::Legacy(row)
    }
}

impl From<MultiLineSaleRow> for RawSaleRow {
    fn from(row: MultiLineSaleRow) -> Self {
        Self::MultiLine(row)
    }
}

impl<'de> Deserialize<'de> for RawSaleRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_multi_line = value
            .get("insurance_items")
            .and_then(|items| items.as_array())
            .is_some_and(|items| !items.is_empty());

        if is_multi_line {
            serde_json::from_value(value)
                .map(Self::MultiLine)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::Legacy)
                .map_err(de::Error::custom)
        }
    }
}
