use autofin_db::models::VehicleModel;
use autofin_db::repository::CreateBatch;
use crate::error::db_error;
use super::repo_impl::VehicleRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;

#[async_trait]
impl CreateBatch<Postgres, VehicleModel> for VehicleRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<VehicleModel>,
    ) -> Result<Vec<VehicleModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl VehicleRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &VehicleRepositoryImpl,
        items: Vec<VehicleModel>,
    ) -> Result<Vec<VehicleModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in &items {
            item.validate()?;
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO vehicles (id, brand, model, year, price, vin_hash, category, stock_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        }

        tracing::debug!(count = items.len(), "inserted vehicles");
        Ok(items)
    }
}
