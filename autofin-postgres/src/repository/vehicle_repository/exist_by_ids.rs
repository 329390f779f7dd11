use autofin_db::repository::ExistByIds;
use crate::error::db_error;
use super::repo_impl::VehicleRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl ExistByIds<Postgres> for VehicleRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let existing: Vec<Uuid> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_scalar("SELECT id FROM vehicles WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };
        let existing: HashSet<Uuid> = existing.into_iter().collect();

        Ok(ids.iter().map(|id| (*id, existing.contains(id))).collect())
    }
}
