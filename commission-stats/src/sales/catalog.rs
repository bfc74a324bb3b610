//! Line items for new sales
//!
//! The reference commission of an insurance type is copied into the line
//! item when the sale is created. Existing sales are never re-priced from
//! the catalog.

use shared::models::{InsuranceType, SaleLineItem};

use crate::core::{StatsError, StatsResult};

/// Build line items for the selected insurance types
///
/// Each id must name an active catalog entry. Selecting the same type twice
/// yields two line items.
pub fn build_line_items(
    type_ids: &[&str],
    insurance_types: &[InsuranceType],
) -> StatsResult<Vec<SaleLineItem>> {
    if type_ids.is_empty() {
        return Err(StatsError::InvalidLineItem(
            "at least one insurance type must be selected".to_string(),
        ));
    }

    type_ids
        .iter()
        .map(|type_id| {
            let insurance = insurance_types
                .iter()
                .find(|t| t.id == *type_id)
                .ok_or_else(|| {
                    StatsError::InvalidLineItem(format!("insurance type {} not found", type_id))
                })?;

            if !insurance.is_active {
                return Err(StatsError::InvalidLineItem(format!(
                    "insurance type {} is inactive",
                    type_id
                )));
            }

            Ok(insurance.to_line_item())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<InsuranceType> {
        vec![
            InsuranceType {
                id: "auto".to_string(),
                name: "Auto".to_string(),
                commission_amount: dec!(12),
                is_active: true,
            },
            InsuranceType {
                id: "home".to_string(),
                name: "Habitation".to_string(),
                commission_amount: dec!(8),
                is_active: true,
            },
            InsuranceType {
                id: "legacy".to_string(),
                name: "Ancien contrat".to_string(),
                commission_amount: dec!(3),
                is_active: false,
            },
        ]
    }

    #[test]
    fn test_builds_items_in_selection_order() {
        let items = build_line_items(&["home", "auto"], &catalog()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].insurance_type_id, "home");
        assert_eq!(items[1].commission_amount, dec!(12));

        let total: Decimal = items.iter().map(|i| i.commission_amount).sum();
        assert_eq!(total, dec!(20));
    }

    #[test]
    fn test_rejects_unknown_inactive_and_empty() {
        assert!(matches!(
            build_line_items(&["life"], &catalog()),
            Err(StatsError::InvalidLineItem(_))
        ));
        assert!(matches!(
            build_line_items(&["legacy"], &catalog()),
            Err(StatsError::InvalidLineItem(_))
        ));
        assert!(build_line_items(&[], &catalog()).is_err());
    }
}
