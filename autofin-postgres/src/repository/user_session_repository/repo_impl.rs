use autofin_db::models::UserSessionModel;
use crate::utils::{get_heapless_string, get_optional_ip_address, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct UserSessionRepositoryImpl {
    pub executor: Executor,
}

impl UserSessionRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for UserSessionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UserSessionModel {
            id: row.try_get("id")?,
            user_id: get_heapless_string(row, "user_id")?,
            client_id: row.try_get("client_id")?,
            calculation_id: row.try_get("calculation_id")?,
            ip_address: get_optional_ip_address(row, "ip_address")?,
            user_agent: row.try_get("user_agent")?,
            started_at: row.try_get("started_at")?,
            ended_at: row.try_get("ended_at")?,
        })
    }
}
