use autofin_api::{ApiError, ApiResult, ClientProfile, EmploymentType};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::{bounded, email_hash, passport_hash, phone_hash};

/// Database model for a loan or lease applicant.
///
/// Identity documents are stored as hashes only. The full name is encrypted
/// by the database (pgcrypto) and never held here in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientModel {
    pub id: Uuid,
    /// Unique across all clients
    pub passport_hash: HeaplessString<64>,
    pub phone_hash: Option<HeaplessString<64>>,
    pub email_hash: Option<HeaplessString<64>>,
    pub full_name_encrypted: Vec<u8>,
    pub monthly_income: Decimal,
    pub employment_type: EmploymentType,
    pub experience_months: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientModel {
    pub fn from_profile(
        id: Uuid,
        profile: &ClientProfile,
        full_name_encrypted: Vec<u8>,
        now: DateTime<Utc>,
    ) -> ApiResult<Self> {
        Ok(Self {
            id,
            passport_hash: bounded(&passport_hash(profile), "passport_hash")?,
            phone_hash: Some(bounded(&phone_hash(&profile.phone), "phone_hash")?),
            email_hash: Some(bounded(&email_hash(&profile.email), "email_hash")?),
            full_name_encrypted,
            monthly_income: profile.monthly_income,
            employment_type: profile.employment_type,
            experience_months: profile.experience_months,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.monthly_income < Decimal::ZERO {
            return Err(ApiError::validation("Monthly income cannot be negative"));
        }
        if self.experience_months < 0 {
            return Err(ApiError::validation("Experience cannot be negative"));
        }
        if self.updated_at < self.created_at {
            return Err(ApiError::validation("updated_at precedes created_at"));
        }
        Ok(())
    }
}

impl Identifiable for ClientModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
