use autofin_api::{ApiError, ApiResult, VehicleCategory, VehicleSpec};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::{bounded, vin_hash};

/// Database model for a catalog vehicle available for financing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleModel {
    pub id: Uuid,
    pub brand: HeaplessString<50>,
    pub model: HeaplessString<50>,
    pub year: i32,
    pub price: Decimal,
    /// Unique across all vehicles
    pub vin_hash: HeaplessString<64>,
    pub category: VehicleCategory,
    /// Identifier in the dealer's stock system
    pub stock_id: Option<HeaplessString<32>>,
    pub created_at: DateTime<Utc>,
}

impl VehicleModel {
    pub fn from_spec(
        id: Uuid,
        spec: &VehicleSpec,
        stock_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<Self> {
        Ok(Self {
            id,
            brand: bounded(&spec.brand, "brand")?,
            model: bounded(&spec.model, "model")?,
            year: spec.year,
            price: spec.price,
            vin_hash: bounded(&vin_hash(&spec.vin), "vin_hash")?,
            category: spec.category,
            stock_id: stock_id.map(|s| bounded(s, "stock_id")).transpose()?,
            created_at: now,
        })
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.price < Decimal::ZERO {
            return Err(ApiError::validation("Vehicle price cannot be negative"));
        }
        Ok(())
    }
}

impl Identifiable for VehicleModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
