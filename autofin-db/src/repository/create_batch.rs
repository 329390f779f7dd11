use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Inserts several rows in the caller's transaction.
///
/// Implementations validate each item before writing anything, so a batch
/// with one invalid row leaves the table untouched.
///
/// # Example
/// ```ignore
/// impl CreateBatch<Postgres, VehicleModel> for VehicleRepositoryImpl {
///     async fn create_batch(&self, items: Vec<VehicleModel>) -> Result<Vec<VehicleModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// # Returns
    /// * `Ok(Vec<T>)` - The stored rows, in input order
    /// * `Err` - A validation, constraint or connection error
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
