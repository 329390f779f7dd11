use autofin_db::repository::DeleteBatch;
use crate::error::db_error;
use super::repo_impl::VehicleRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl DeleteBatch<Postgres> for VehicleRepositoryImpl {
    /// Calculations for the deleted vehicles are removed by cascade.
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() as usize)
    }
}
