use autofin_db::models::VehicleModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::VehicleRepositoryImpl;
use std::error::Error;

impl VehicleRepositoryImpl {
    pub async fn find_by_vin_hash(
        &self,
        vin_hash: &str,
    ) -> Result<Option<VehicleModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM vehicles WHERE vin_hash = $1")
                .bind(vin_hash)
                .fetch_optional(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        row.as_ref().map(VehicleModel::try_from_row).transpose()
    }
}
