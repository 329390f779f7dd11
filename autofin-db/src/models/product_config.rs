use autofin_api::{ApiError, ApiResult, FinancingType, ProductRule, VehicleCategory};
use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Eligibility conditions stored in the `conditions` JSONB column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductConditions {
    /// Minimum initial payment as a fraction of the price
    pub min_initial: Decimal,
    pub available_for: Vec<VehicleCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_percent: Option<Decimal>,
}

/// Financing product template (credit or leasing).
///
/// Standalone reference data; calculations point at it only through
/// `session_data.product_config_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductConfigModel {
    pub id: Uuid,
    pub code: HeaplessString<32>,
    pub name: HeaplessString<100>,
    pub product_type: FinancingType,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub min_months: i32,
    pub max_months: i32,
    /// Annual percent
    pub base_rate: Decimal,
    pub conditions: Json<ProductConditions>,
    pub is_active: bool,
    pub valid_from: NaiveDate,
    /// Open-ended when `None`
    pub valid_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl ProductConfigModel {
    /// Checks the bounds the table also enforces with CHECK constraints.
    pub fn validate(&self) -> ApiResult<()> {
        if self.min_amount > self.max_amount {
            return Err(ApiError::validation(format!(
                "Product '{}': min_amount exceeds max_amount",
                self.code
            )));
        }
        if self.min_months > self.max_months {
            return Err(ApiError::validation(format!(
                "Product '{}': min_months exceeds max_months",
                self.code
            )));
        }
        if let Some(valid_to) = self.valid_to {
            if self.valid_from > valid_to {
                return Err(ApiError::validation(format!(
                    "Product '{}': valid_from is after valid_to",
                    self.code
                )));
            }
        }
        Ok(())
    }

    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.valid_from <= date
            && self.valid_to.map_or(true, |valid_to| date <= valid_to)
    }

    pub fn to_rule(&self) -> ProductRule {
        ProductRule {
            id: Some(self.id),
            code: self.code.to_string(),
            name: self.name.to_string(),
            financing_type: self.product_type,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            min_months: self.min_months,
            max_months: self.max_months,
            base_rate: self.base_rate,
            min_initial: self.conditions.min_initial,
            available_for: self.conditions.available_for.clone(),
            residual_percent: self.conditions.residual_percent,
        }
    }
}

impl Identifiable for ProductConfigModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product() -> ProductConfigModel {
        ProductConfigModel {
            id: Uuid::new_v4(),
            code: HeaplessString::try_from("credit_std").unwrap(),
            name: HeaplessString::try_from("Standard credit").unwrap(),
            product_type: FinancingType::Credit,
            min_amount: dec!(100000),
            max_amount: dec!(5000000),
            min_months: 12,
            max_months: 84,
            base_rate: dec!(15.9),
            conditions: Json(ProductConditions {
                min_initial: dec!(0.15),
                available_for: vec![VehicleCategory::New, VehicleCategory::Used],
                residual_percent: None,
            }),
            is_active: true,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to: Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_bounds_validation() {
        assert!(product().validate().is_ok());

        let mut p = product();
        p.min_amount = dec!(6000000);
        assert!(p.validate().is_err());

        let mut p = product();
        p.min_months = 96;
        assert!(p.validate().is_err());

        let mut p = product();
        p.valid_to = Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(p.validate().is_err());

        let mut p = product();
        p.valid_to = None;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validity_window() {
        let p = product();
        assert!(p.is_valid_on(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()));
        assert!(!p.is_valid_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!p.is_valid_on(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()));

        let mut inactive = product();
        inactive.is_active = false;
        assert!(!inactive.is_valid_on(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()));
    }

    #[test]
    fn test_conditions_json_shape() {
        let p = product();
        let json = serde_json::to_value(&p.conditions).unwrap();
        assert_eq!(json["available_for"], serde_json::json!(["new", "used"]));
        assert!(json.get("residual_percent").is_none());

        let rule = p.to_rule();
        assert_eq!(rule.id, Some(p.id));
        assert_eq!(rule.min_initial, dec!(0.15));
        assert_eq!(rule.code, "credit_std");
    }
}
