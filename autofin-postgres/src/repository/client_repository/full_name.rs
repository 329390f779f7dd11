use autofin_api::ApiError;
use crate::error::db_error;
use super::repo_impl::ClientRepositoryImpl;
use std::error::Error;
use uuid::Uuid;

impl ClientRepositoryImpl {
    /// Encrypts a full name with pgcrypto's `pgp_sym_encrypt`.
    ///
    /// The ciphertext is what `ClientModel::full_name_encrypted` carries into
    /// `create_batch` and `upsert_by_passport_hash`.
    pub async fn encrypt_full_name(
        &self,
        full_name: &str,
        key: &str,
    ) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        if key.is_empty() {
            return Err(ApiError::validation("Encryption key is empty").into());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let encrypted: Vec<u8> = sqlx::query_scalar("SELECT pgp_sym_encrypt($1, $2)")
            .bind(full_name)
            .bind(key)
            .fetch_one(&mut **transaction)
            .await
            .map_err(db_error)?;
        Ok(encrypted)
    }

    /// Returns `None` when the client does not exist. A wrong key fails
    /// with a database error.
    pub async fn decrypt_full_name(
        &self,
        id: Uuid,
        key: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let name: Option<String> = sqlx::query_scalar(
            "SELECT pgp_sym_decrypt(full_name_encrypted, $2) FROM clients WHERE id = $1",
        )
        .bind(id)
        .bind(key)
        .fetch_optional(&mut **transaction)
        .await
        .map_err(db_error)?;
        Ok(name)
    }
}
