use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::financing::{FinancingType, VehicleCategory};

/// Eligibility and pricing rule of a financing product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRule {
    /// Row id when the rule was loaded from `product_configs`
    pub id: Option<Uuid>,
    pub code: String,
    pub name: String,
    pub financing_type: FinancingType,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub min_months: i32,
    pub max_months: i32,
    /// Annual percent
    pub base_rate: Decimal,
    /// Minimum initial payment as a fraction of the price
    pub min_initial: Decimal,
    pub available_for: Vec<VehicleCategory>,
    pub residual_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub product_id: Option<Uuid>,
    pub product_code: String,
    pub product_name: String,
    pub financing_type: FinancingType,
    pub monthly_payment: Decimal,
    /// Annual percent actually priced, one decimal place
    pub rate: Decimal,
    pub reason: String,
}
