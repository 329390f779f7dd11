use autofin_db::models::ClientModel;
use autofin_db::repository::CreateBatch;
use crate::error::db_error;
use super::repo_impl::ClientRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;

#[async_trait]
impl CreateBatch<Postgres, ClientModel> for ClientRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ClientModel>,
    ) -> Result<Vec<ClientModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl ClientRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ClientRepositoryImpl,
        items: Vec<ClientModel>,
    ) -> Result<Vec<ClientModel>, Box<dyn Error + Send + Sync>> {
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
                INSERT INTO clients (
                    id, passport_hash, phone_hash, email_hash, full_name_encrypted,
                    monthly_income, employment_type, experience_months, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id)
            .bind(item.passport_hash.as_str())
            .bind(item.phone_hash.as_ref().map(|s| s.as_str()))
            .bind(item.email_hash.as_ref().map(|s| s.as_str()))
            .bind(&item.full_name_encrypted)
            .bind(item.monthly_income)
            .bind(item.employment_type)
            .bind(item.experience_months)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        }

        tracing::debug!(count = items.len(), "inserted clients");
        Ok(items)
    }
}
