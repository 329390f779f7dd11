use autofin_api::ApiError;
use autofin_db::models::CalculationModel;
use autofin_db::repository::CreateBatch;
use crate::error::db_error;
use super::repo_impl::CalculationRepositoryImpl;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::Postgres;
use std::error::Error;

#[async_trait]
impl CreateBatch<Postgres, CalculationModel> for CalculationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CalculationModel>,
    ) -> Result<Vec<CalculationModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

fn validate(item: &CalculationModel) -> Result<(), ApiError> {
    if item.months <= 0 {
        return Err(ApiError::validation("Term must be positive"));
    }
    if item.approval_score < Decimal::ZERO || item.approval_score > Decimal::ONE_HUNDRED {
        return Err(ApiError::validation("Approval score must be between 0 and 100"));
    }
    Ok(())
}

impl CalculationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CalculationRepositoryImpl,
        items: Vec<CalculationModel>,
    ) -> Result<Vec<CalculationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in &items {
            validate(item)?;
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO calculations (
                    id, client_id, vehicle_id, financing_type, amount, initial_payment, months,
                    monthly_payment, total_payment, effective_rate, approval_status, approval_score,
                    session_data, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(item.id)
            .bind(item.client_id)
            .bind(item.vehicle_id)
            .bind(item.financing_type)
            .bind(item.amount)
            .bind(item.initial_payment)
            .bind(item.months)
            .bind(item.monthly_payment)
            .bind(item.total_payment)
            .bind(item.effective_rate)
            .bind(item.approval_status)
            .bind(item.approval_score)
            .bind(&item.session_data)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        }

        tracing::debug!(count = items.len(), "inserted calculations");
        Ok(items)
    }
}
