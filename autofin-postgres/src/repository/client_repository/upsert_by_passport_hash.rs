use autofin_db::models::ClientModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::ClientRepositoryImpl;
use std::error::Error;

impl ClientRepositoryImpl {
    /// Inserts the client or refreshes the mutable fields of the client with
    /// the same passport hash. `created_at` and `id` of an existing row are
    /// kept and `updated_at` is bumped.
    pub async fn upsert_by_passport_hash(
        &self,
        item: &ClientModel,
    ) -> Result<ClientModel, Box<dyn Error + Send + Sync>> {
        item.validate()?;

        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                INSERT INTO clients (
                    id, passport_hash, phone_hash, email_hash, full_name_encrypted,
                    monthly_income, employment_type, experience_months, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (passport_hash) DO UPDATE
                SET phone_hash = EXCLUDED.phone_hash,
                    email_hash = EXCLUDED.email_hash,
                    full_name_encrypted = EXCLUDED.full_name_encrypted,
                    monthly_income = EXCLUDED.monthly_income,
                    employment_type = EXCLUDED.employment_type,
                    experience_months = EXCLUDED.experience_months,
                    updated_at = GREATEST(EXCLUDED.updated_at, clients.created_at)
                RETURNING *
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
            .fetch_one(&mut **transaction)
            .await
            .map_err(db_error)?
        };

        ClientModel::try_from_row(&row)
    }
}
