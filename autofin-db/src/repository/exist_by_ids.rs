use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Checks which of the given ids exist.
///
/// Used before inserting dependent rows, e.g. that a calculation's client
/// and vehicle are present.
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    /// # Returns
    /// * `Ok(Vec<(Uuid, bool)>)` - Each requested id paired with its existence, in input order
    /// * `Err` - An error if the query could not be executed
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
