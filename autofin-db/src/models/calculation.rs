use autofin_api::{ApprovalStatus, CalculationConditions, FinancingType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Free-form context stored in `calculations.session_data`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    /// References `product_configs.id`; not enforced by a foreign key
    pub product_config_id: Option<Uuid>,
    pub insurance_included: bool,
    pub life_insurance: bool,
    pub conditions: Option<CalculationConditions>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Database model for a financing quote of a client and vehicle pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CalculationModel {
    pub id: Uuid,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub financing_type: FinancingType,
    pub amount: Decimal,
    pub initial_payment: Decimal,
    pub months: i32,
    pub monthly_payment: Decimal,
    /// Monthly payment times months; a leasing buyout is kept in the conditions
    pub total_payment: Decimal,
    pub effective_rate: Decimal,
    pub approval_status: ApprovalStatus,
    pub approval_score: Decimal,
    pub session_data: Json<SessionData>,
    pub created_at: DateTime<Utc>,
}

impl CalculationModel {
    /// Buyout due at the end of a lease; zero for credit.
    pub fn residual_value(&self) -> Decimal {
        self.session_data
            .conditions
            .as_ref()
            .and_then(|c| c.residual_value)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Identifiable for CalculationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
