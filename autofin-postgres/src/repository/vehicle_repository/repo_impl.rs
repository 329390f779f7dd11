use autofin_db::models::VehicleModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct VehicleRepositoryImpl {
    pub executor: Executor,
}

impl VehicleRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for VehicleModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(VehicleModel {
            id: row.try_get("id")?,
            brand: get_heapless_string(row, "brand")?,
            model: get_heapless_string(row, "model")?,
            year: row.try_get("year")?,
            price: row.try_get("price")?,
            vin_hash: get_heapless_string(row, "vin_hash")?,
            category: row.try_get("category")?,
            stock_id: get_optional_heapless_string(row, "stock_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
