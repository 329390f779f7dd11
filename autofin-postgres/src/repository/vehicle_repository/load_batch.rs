use autofin_api::ApiError;
use autofin_db::models::VehicleModel;
use autofin_db::repository::{Load, LoadBatch};
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::VehicleRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl LoadBatch<Postgres, VehicleModel> for VehicleRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<VehicleModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, VehicleModel> for VehicleRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<VehicleModel, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, &[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("Vehicle {id}")).into())
    }
}

impl VehicleRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &VehicleRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<VehicleModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM vehicles WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        let mut loaded: HashMap<Uuid, VehicleModel> = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = VehicleModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
