use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Loads a single row by id.
#[async_trait]
pub trait Load<DB: Database, T: Identifiable>: Send + Sync {
    /// # Returns
    /// * `Ok(T)` - The loaded row
    /// * `Err` - `ApiError::NotFound` when no row has this id, or a query error
    async fn load(&self, id: Uuid) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
