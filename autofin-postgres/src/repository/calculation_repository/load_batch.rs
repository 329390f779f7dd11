use autofin_api::ApiError;
use autofin_db::models::CalculationModel;
use autofin_db::repository::{Load, LoadBatch};
use crate::error::db_error;
use super::repo_impl::CalculationRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl LoadBatch<Postgres, CalculationModel> for CalculationRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CalculationModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as::<_, CalculationModel>("SELECT * FROM calculations WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        let mut loaded: HashMap<Uuid, CalculationModel> =
            rows.into_iter().map(|model| (model.id, model)).collect();
        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}

#[async_trait]
impl Load<Postgres, CalculationModel> for CalculationRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<CalculationModel, Box<dyn Error + Send + Sync>> {
        self.load_batch(&[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("Calculation {id}")).into())
    }
}
