use autofin_api::ApiError;
use autofin_db::models::UserSessionModel;
use autofin_db::repository::{Load, LoadBatch};
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::UserSessionRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

#[async_trait]
impl LoadBatch<Postgres, UserSessionModel> for UserSessionRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<UserSessionModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM user_sessions WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        let mut loaded = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = UserSessionModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }
        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}

#[async_trait]
impl Load<Postgres, UserSessionModel> for UserSessionRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<UserSessionModel, Box<dyn Error + Send + Sync>> {
        self.load_batch(&[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("User session {id}")).into())
    }
}
