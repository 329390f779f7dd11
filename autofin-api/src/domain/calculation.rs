use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::financing::{ApprovalStatus, FinancingType, VehicleCategory};
use crate::domain::vehicle::VehicleSpec;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationParameters {
    pub financing_type: FinancingType,
    pub amount: Decimal,
    pub initial_payment: Decimal,
    pub months: i32,
    pub vehicle: Option<VehicleSpec>,
    /// CASCO insurance rolled into the monthly payment
    pub insurance_included: bool,
    pub life_insurance: bool,
    /// Annual rate in percent taken from a product; `None` prices with the built-in table
    #[serde(default)]
    pub base_rate: Option<Decimal>,
}

impl CalculationParameters {
    pub fn new(
        financing_type: FinancingType,
        amount: Decimal,
        initial_payment: Decimal,
        months: i32,
    ) -> Self {
        Self {
            financing_type,
            amount,
            initial_payment,
            months,
            vehicle: None,
            insurance_included: true,
            life_insurance: false,
            base_rate: None,
        }
    }

    pub fn with_vehicle(mut self, vehicle: VehicleSpec) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    pub fn with_base_rate(mut self, percent: Decimal) -> Self {
        self.base_rate = Some(percent);
        self
    }

    pub fn financed_amount(&self) -> Decimal {
        self.amount - self.initial_payment
    }

    /// Category used for rate selection; quotes without a vehicle are priced as used.
    pub fn vehicle_category(&self) -> VehicleCategory {
        self.vehicle
            .as_ref()
            .map(|v| v.category)
            .unwrap_or(VehicleCategory::Used)
    }
}

/// Pricing conditions that produced a result. Persisted inside `session_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationConditions {
    /// Annual rate in percent, one decimal place
    pub base_rate: Decimal,
    pub vehicle_type: VehicleCategory,
    pub residual_value: Option<Decimal>,
    pub insurance_included: bool,
    pub life_insurance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    pub month: i32,
    pub date: NaiveDate,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub overpayment: Decimal,
    /// Annualised percent
    pub effective_rate: Decimal,
    pub schedule: Vec<ScheduleEntry>,
    pub approval_status: ApprovalStatus,
    pub approval_score: Decimal,
    pub conditions: CalculationConditions,
}

/// Result of scoring a client against a set of parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    /// 0 to 100
    pub score: Decimal,
    pub status: ApprovalStatus,
    pub reasons: Vec<String>,
}
