use autofin_db::models::VehicleModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::VehicleRepositoryImpl;
use std::error::Error;

impl VehicleRepositoryImpl {
    /// Inserts the vehicle or, when its VIN is already known, overwrites the
    /// existing row with the submitted description. A missing stock id keeps
    /// the stored one. Returns the stored row, whose id is the existing one on
    /// conflict.
    pub async fn upsert_by_vin_hash(
        &self,
        item: &VehicleModel,
    ) -> Result<VehicleModel, Box<dyn Error + Send + Sync>> {
        item.validate()?;

        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                INSERT INTO vehicles (id, brand, model, year, price, vin_hash, category, stock_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (vin_hash) DO UPDATE
                SET brand = EXCLUDED.brand,
                    model = EXCLUDED.model,
                    year = EXCLUDED.year,
                    price = EXCLUDED.price,
                    category = EXCLUDED.category,
                    stock_id = COALESCE(EXCLUDED.stock_id, vehicles.stock_id)
                RETURNING *
                "#,
            )
            .bind(item.id)
            .bind(item.brand.as_str())
            .bind(item.model.as_str())
            .bind(item.year)
            .bind(item.price)
            .bind(item.vin_hash.as_str())
            .bind(item.category)
            .bind(item.stock_id.as_ref().map(|s| s.as_str()))
            .bind(item.created_at)
            .fetch_one(&mut **transaction)
            .await
            .map_err(db_error)?
        };

        VehicleModel::try_from_row(&row)
    }
}
