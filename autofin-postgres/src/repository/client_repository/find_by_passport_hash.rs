use autofin_db::models::ClientModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::ClientRepositoryImpl;
use std::error::Error;

impl ClientRepositoryImpl {
    pub async fn find_by_passport_hash(
        &self,
        passport_hash: &str,
    ) -> Result<Option<ClientModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM clients WHERE passport_hash = $1")
                .bind(passport_hash)
                .fetch_optional(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        row.as_ref().map(ClientModel::try_from_row).transpose()
    }
}
