use autofin_db::models::ClientHistoryRow;
use crate::error::db_error;
use super::repo_impl::ReportRepositoryImpl;
use std::error::Error;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

impl ReportRepositoryImpl {
    /// Latest calculations of the client with this passport hash, newest first.
    pub async fn client_history(
        &self,
        passport_hash: &str,
        limit: usize,
    ) -> Result<Vec<ClientHistoryRow>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query_as::<_, ClientHistoryRow>(
            r#"
            SELECT
                calc.id AS calculation_id,
                calc.created_at,
                v.brand,
                v.model,
                calc.financing_type,
                calc.amount,
                calc.monthly_payment,
                calc.approval_status,
                calc.approval_score
            FROM clients c
            JOIN calculations calc ON calc.client_id = c.id
            JOIN vehicles v ON v.id = calc.vehicle_id
            WHERE c.passport_hash = $1
            ORDER BY calc.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(passport_hash)
        .bind(limit as i64)
        .fetch_all(&mut **transaction)
        .await
        .map_err(db_error)?;

        Ok(rows)
    }
}
