use autofin_db::models::ProductConfigModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::ProductConfigRepositoryImpl;
use std::error::Error;

impl ProductConfigRepositoryImpl {
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<ProductConfigModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM product_configs WHERE code = $1")
                .bind(code)
                .fetch_optional(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        row.as_ref().map(ProductConfigModel::try_from_row).transpose()
    }
}
