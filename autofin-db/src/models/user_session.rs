use autofin_api::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Audit record of the manager session that produced a calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSessionModel {
    pub id: Uuid,
    /// Manager login
    pub user_id: HeaplessString<64>,
    pub client_id: Uuid,
    pub calculation_id: Uuid,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl UserSessionModel {
    pub fn validate(&self) -> ApiResult<()> {
        match self.ended_at {
            Some(ended_at) if ended_at < self.started_at => Err(ApiError::validation(
                "Session cannot end before it starts",
            )),
            _ => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

impl Identifiable for UserSessionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
