use autofin_db::models::ClientModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ClientRepositoryImpl {
    pub executor: Executor,
}

impl ClientRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ClientModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ClientModel {
            id: row.try_get("id")?,
            passport_hash: get_heapless_string(row, "passport_hash")?,
            phone_hash: get_optional_heapless_string(row, "phone_hash")?,
            email_hash: get_optional_heapless_string(row, "email_hash")?,
            full_name_encrypted: row.try_get("full_name_encrypted")?,
            monthly_income: row.try_get("monthly_income")?,
            employment_type: row.try_get("employment_type")?,
            experience_months: row.try_get("experience_months")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
