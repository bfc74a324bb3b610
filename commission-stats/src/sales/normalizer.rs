//! Sale Record Normalizer
//!
//! Resolves both raw row shapes into [`SaleRecord`] once, at ingestion.
//! Every later stage only sees canonical records.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{
    LegacySaleRow, MultiLineSaleRow, RawSaleRow, SaleLineItem, SaleRecord,
    UNASSIGNED_INSURANCE_TYPE,
};

use crate::core::{MalformedReason, StatsError, StatsResult};
use crate::utils::time::parse_sale_date;

/// Normalizer bound to a reporting time zone
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    tz: Tz,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Normalizer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Normalize one raw row
    pub fn normalize(&self, raw: &RawSaleRow) -> StatsResult<SaleRecord> {
        match raw {
            RawSaleRow::MultiLine(row) => self.normalize_multi_line(row),
            RawSaleRow::Legacy(row) => self.normalize_legacy(row),
        }
    }

    /// Normalize a batch, failing on the first malformed row
    ///
    /// Rows are never skipped: a dropped row would silently corrupt totals.
    pub fn normalize_all(&self, rows: &[RawSaleRow]) -> StatsResult<Vec<SaleRecord>> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                self.normalize(row).map_err(|e| {
                    tracing::warn!(row = index, sale_id = %row.id(), error = %e, "Rejected sale row");
                    e.at_row(index)
                })
            })
            .collect()
    }

    fn normalize_multi_line(&self, row: &MultiLineSaleRow) -> StatsResult<SaleRecord> {
        let sale_date = self.resolve_date(&row.id, row.sale_date.as_deref())?;
        let (employee_id, employee_name) =
            resolve_employee(&row.id, row.employee_id.as_deref(), row.employee_name.as_deref())?;

        if row.insurance_items.is_empty() {
            return Err(StatsError::malformed(&row.id, MalformedReason::NoLineItems));
        }

        let line_items: Vec<SaleLineItem> = row
            .insurance_items
            .iter()
            .map(|item| {
                let (id, name) = resolve_insurance_type(
                    Some(item.insurance_type_id.as_str()),
                    Some(item.insurance_type_name.as_str()),
                );
                SaleLineItem {
                    insurance_type_id: id,
                    insurance_type_name: name,
                    commission_amount: item.commission_amount,
                }
            })
            .collect();

        build_record(
            &row.id,
            sale_date,
            employee_id,
            employee_name,
            row.client_name.clone(),
            line_items,
            row.amount,
            row.status,
        )
    }

    fn normalize_legacy(&self, row: &LegacySaleRow) -> StatsResult<SaleRecord> {
        let sale_date = self.resolve_date(&row.id, row.sale_date.as_deref())?;
        let (employee_id, employee_name) =
            resolve_employee(&row.id, row.employee_id.as_deref(), row.employee_name.as_deref())?;

        let (id, name) = resolve_insurance_type(
            row.insurance_type_id.as_deref(),
            row.insurance_type_name.as_deref(),
        );
        let line_items = vec![SaleLineItem {
            insurance_type_id: id,
            insurance_type_name: name,
            commission_amount: row.commission_amount,
        }];

        build_record(
            &row.id,
            sale_date,
            employee_id,
            employee_name,
            row.client_name.clone(),
            line_items,
            row.amount,
            row.status,
        )
    }

    fn resolve_date(&self, sale_id: &str, raw: Option<&str>) -> StatsResult<NaiveDate> {
        let raw = raw
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| StatsError::malformed(sale_id, MalformedReason::MissingDate))?;
        parse_sale_date(raw, self.tz)
            .ok_or_else(|| StatsError::malformed(sale_id, MalformedReason::InvalidDate))
    }
}

/// Normalize one raw row using UTC as the reporting zone
pub fn normalize(raw: &RawSaleRow) -> StatsResult<SaleRecord> {
    Normalizer::default().normalize(raw)
}

/// Normalize a batch using UTC as the reporting zone
pub fn normalize_all(rows: &[RawSaleRow]) -> StatsResult<Vec<SaleRecord>> {
    Normalizer::default().normalize_all(rows)
}

#[allow(clippy::too_many_arguments)]
fn build_record(
    sale_id: &str,
    sale_date: NaiveDate,
    employee_id: Option<String>,
    employee_name: String,
    client_name: Option<String>,
    line_items: Vec<SaleLineItem>,
    total_amount: Decimal,
    status: shared::models::SaleStatus,
) -> StatsResult<SaleRecord> {
    let total_commission: Decimal = line_items.iter().map(|i| i.commission_amount).sum();
    if total_commission < Decimal::ZERO {
        return Err(StatsError::malformed(
            sale_id,
            MalformedReason::NegativeCommission,
        ));
    }

    Ok(SaleRecord {
        id: sale_id.to_string(),
        sale_date,
        employee_id,
        employee_name,
        client_name,
        line_items,
        total_amount,
        total_commission,
        status,
    })
}

fn resolve_employee(
    sale_id: &str,
    employee_id: Option<&str>,
    employee_name: Option<&str>,
) -> StatsResult<(Option<String>, String)> {
    let id = non_blank(employee_id);
    let name = non_blank(employee_name);
    match (id, name) {
        (None, None) => Err(StatsError::malformed(
            sale_id,
            MalformedReason::MissingEmployee,
        )),
        (id, name) => {
            let label = name.or(id).unwrap_or_default();
            Ok((id.map(String::from), label.to_string()))
        }
    }
}

/// Missing id falls back to the name and vice versa
fn resolve_insurance_type(id: Option<&str>, name: Option<&str>) -> (String, String) {
    match (non_blank(id), non_blank(name)) {
        (Some(id), Some(name)) => (id.to_string(), name.to_string()),
        (Some(id), None) => (id.to_string(), id.to_string()),
        (None, Some(name)) => (name.to_string(), name.to_string()),
        (None, None) => (
            UNASSIGNED_INSURANCE_TYPE.to_string(),
            UNASSIGNED_INSURANCE_TYPE.to_string(),
        ),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::models::{RawLineItem, SaleStatus};

    fn legacy_row(id: &str) -> LegacySaleRow {
        LegacySaleRow {
            id: id.to_string(),
            sale_date: Some("2024-03-05".to_string()),
            employee_id: Some("emp-b".to_string()),
            employee_name: Some("Bob".to_string()),
            client_name: Some("Client 1".to_string()),
            amount: dec!(50),
            insurance_type_id: Some("y".to_string()),
            insurance_type_name: Some("Type Y".to_string()),
            commission_amount: dec!(5),
            status: SaleStatus::Active,
        }
    }

    fn multi_row(id: &str, items: Vec<(&str, Decimal)>) -> MultiLineSaleRow {
        MultiLineSaleRow {
            id: id.to_string(),
            sale_date: Some("2024-03-06".to_string()),
            employee_id: Some("emp-a".to_string()),
            employee_name: Some("Alice".to_string()),
            client_name: None,
            amount: dec!(200),
            insurance_items: items
                .into_iter()
                .map(|(type_id, commission)| RawLineItem {
                    insurance_type_id: type_id.to_string(),
                    insurance_type_name: type_id.to_uppercase(),
                    commission_amount: commission,
                })
                .collect(),
            status: SaleStatus::Active,
        }
    }

    #[test]
    fn test_legacy_row_gets_synthetic_line_item() {
        let record = normalize(&legacy_row("s-1").into()).unwrap();

        assert_eq!(record.line_items.len(), 1);
        assert_eq!(record.line_items[0].insurance_type_id, "y");
        assert_eq!(record.line_items[0].insurance_type_name, "Type Y");
        assert_eq!(record.total_commission, dec!(5));
        assert_eq!(record.total_amount, dec!(50));
        assert_eq!(record.employee_key(), "emp-b");
        assert_eq!(record.client_name.as_deref(), Some("Client 1"));
    }

    #[test]
    fn test_multi_line_row_keeps_items_verbatim() {
        let row = multi_row("s-2", vec![("x", dec!(12)), ("y", dec!(8))]);
        let record = normalize(&row.into()).unwrap();

        assert_eq!(record.line_items.len(), 2);
        assert_eq!(record.line_items[0].insurance_type_id, "x");
        assert_eq!(record.line_items[1].commission_amount, dec!(8));
        assert_eq!(record.total_commission, dec!(20));
        assert_eq!(record.total_commission, record.line_commission_sum());
    }

    #[test]
    fn test_missing_date_is_malformed() {
        let mut row = legacy_row("s-3");
        row.sale_date = None;
        let err = normalize(&row.into()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::MalformedRecord {
                reason: MalformedReason::MissingDate,
                ..
            }
        ));
    }

    #[test]
    fn test_unparseable_date_is_malformed() {
        let mut row = legacy_row("s-4");
        row.sale_date = Some("mardi dernier".to_string());
        let err = normalize(&row.into()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::MalformedRecord {
                reason: MalformedReason::InvalidDate,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_commission_sum_is_malformed() {
        let row = multi_row("s-5", vec![("x", dec!(5)), ("y", dec!(-8))]);
        let err = normalize(&row.into()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::MalformedRecord {
                reason: MalformedReason::NegativeCommission,
                ..
            }
        ));
    }

    #[test]
    fn test_single_negative_line_with_positive_sum_is_accepted() {
        // Only the sum is constrained
        let row = multi_row("s-6", vec![("x", dec!(10)), ("y", dec!(-2))]);
        let record = normalize(&row.into()).unwrap();
        assert_eq!(record.total_commission, dec!(8));
    }

    #[test]
    fn test_stored_empty_item_list_normalizes_as_legacy() {
        let row: RawSaleRow = serde_json::from_str(
            r#"{
                "id": "s-7",
                "sale_date": "2024-03-05",
                "employee_id": "emp-b",
                "employee_name": "Bob",
                "amount": 100.0,
                "insurance_type_id": "x",
                "insurance_type_name": "Auto",
                "commission_amount": 10.0,
                "insurance_items": []
            }"#,
        )
        .unwrap();

        let record = normalize(&row).unwrap();
        assert_eq!(record.line_items.len(), 1);
        assert_eq!(record.line_items[0].insurance_type_id, "x");
        assert_eq!(record.total_commission, dec!(10));

        let records = normalize_all(&[row, legacy_row("s-8").into()]).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_multi_line_row_without_items_is_malformed() {
        let row = multi_row("s-7", vec![]);
        let err = normalize(&row.into()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::MalformedRecord {
                reason: MalformedReason::NoLineItems,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_employee_is_malformed() {
        let mut row = legacy_row("s-8");
        row.employee_id = None;
        row.employee_name = Some("   ".to_string());
        let err = normalize(&row.into()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::MalformedRecord {
                reason: MalformedReason::MissingEmployee,
                ..
            }
        ));
    }

    #[test]
    fn test_legacy_row_without_id_keys_on_name() {
        let mut row = legacy_row("s-9");
        row.employee_id = None;
        let record = normalize(&row.into()).unwrap();
        assert_eq!(record.employee_id, None);
        assert_eq!(record.employee_key(), "Bob");
    }

    #[test]
    fn test_insurance_type_fallbacks() {
        let mut row = legacy_row("s-10");
        row.insurance_type_id = None;
        let record = normalize(&row.into()).unwrap();
        assert_eq!(record.line_items[0].insurance_type_id, "Type Y");

        let mut row = legacy_row("s-11");
        row.insurance_type_id = None;
        row.insurance_type_name = None;
        let record = normalize(&row.into()).unwrap();
        assert_eq!(
            record.line_items[0].insurance_type_id,
            UNASSIGNED_INSURANCE_TYPE
        );
    }

    #[test]
    fn test_timestamp_is_converted_once_at_ingestion() {
        let mut row = legacy_row("s-12");
        row.sale_date = Some("2024-03-05T23:30:00Z".to_string());

        let utc = Normalizer::new(Tz::UTC).normalize(&row.clone().into()).unwrap();
        let paris = Normalizer::new(chrono_tz::Europe::Paris)
            .normalize(&row.into())
            .unwrap();

        assert_eq!(utc.sale_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(paris.sale_date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn test_deleted_status_is_preserved() {
        let mut row = legacy_row("s-13");
        row.status = SaleStatus::Deleted;
        let record = normalize(&row.into()).unwrap();
        assert!(!record.is_active());
    }

    #[test]
    fn test_normalize_all_reports_failing_row() {
        let mut broken = legacy_row("s-broken");
        broken.sale_date = None;
        let rows: Vec<RawSaleRow> = vec![
            legacy_row("s-ok").into(),
            multi_row("s-multi", vec![("x", dec!(1))]).into(),
            broken.into(),
        ];

        let err = normalize_all(&rows).unwrap_err();
        match err {
            StatsError::MalformedRecord { sale_id, row, .. } => {
                assert_eq!(sale_id, "s-broken");
                assert_eq!(row, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let ok = normalize_all(&rows[..2]).unwrap();
        assert_eq!(ok.len(), 2);
    }
}
