use autofin_db::models::ProductConfigModel;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ProductConfigRepositoryImpl {
    pub executor: Executor,
}

impl ProductConfigRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ProductConfigModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ProductConfigModel {
            id: row.try_get("id")?,
            code: get_heapless_string(row, "code")?,
            name: get_heapless_string(row, "name")?,
            product_type: row.try_get("product_type")?,
            min_amount: row.try_get("min_amount")?,
            max_amount: row.try_get("max_amount")?,
            min_months: row.try_get("min_months")?,
            max_months: row.try_get("max_months")?,
            base_rate: row.try_get("base_rate")?,
            conditions: row.try_get("conditions")?,
            is_active: row.try_get("is_active")?,
            valid_from: row.try_get("valid_from")?,
            valid_to: row.try_get("valid_to")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
