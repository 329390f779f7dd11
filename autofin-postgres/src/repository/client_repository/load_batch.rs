use autofin_api::ApiError;
use autofin_db::models::ClientModel;
use autofin_db::repository::{Load, LoadBatch};
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::ClientRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl LoadBatch<Postgres, ClientModel> for ClientRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ClientModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, ClientModel> for ClientRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ClientModel, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, &[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("Client {id}")).into())
    }
}

impl ClientRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ClientRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ClientModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM clients WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        let mut loaded = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = ClientModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
