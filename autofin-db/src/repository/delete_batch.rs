use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Deletes rows by id; dependent rows go with them through `ON DELETE CASCADE`.
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    /// # Returns
    /// * `Ok(usize)` - Number of rows actually deleted
    /// * `Err` - An error if the statement could not be executed
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
