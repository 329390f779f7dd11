use autofin_db::models::ProductConfigModel;
use chrono::NaiveDate;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::ProductConfigRepositoryImpl;
use std::error::Error;

impl ProductConfigRepositoryImpl {
    /// Active products whose validity window contains `date`, by code.
    pub async fn find_active_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ProductConfigModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM product_configs
                WHERE is_active
                  AND valid_from <= $1
                  AND (valid_to IS NULL OR valid_to >= $1)
                ORDER BY code
                "#,
            )
            .bind(date)
            .fetch_all(&mut **transaction)
            .await
            .map_err(db_error)?
        };

        rows.iter().map(ProductConfigModel::try_from_row).collect()
    }
}
