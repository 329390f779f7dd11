use autofin_db::models::ProductPopularityRow;
use chrono::{DateTime, Utc};
use crate::error::db_error;
use super::repo_impl::ReportRepositoryImpl;
use std::error::Error;

impl ReportRepositoryImpl {
    /// Demand per financing type since `since`, most requested first.
    pub async fn popular_products(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ProductPopularityRow>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query_as::<_, ProductPopularityRow>(
            r#"
            SELECT
                financing_type,
                COUNT(*) AS calculations_count,
                ROUND(AVG(amount), 2) AS avg_amount,
                ROUND(AVG(months), 1) AS avg_months,
                COUNT(*) FILTER (WHERE approval_status = 'pre_approved') AS approved
            FROM calculations
            WHERE created_at >= $1
            GROUP BY financing_type
            ORDER BY calculations_count DESC, financing_type
            "#,
        )
        .bind(since)
        .fetch_all(&mut **transaction)
        .await
        .map_err(db_error)?;

        Ok(rows)
    }
}
