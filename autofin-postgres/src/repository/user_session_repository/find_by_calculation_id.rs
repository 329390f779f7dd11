use autofin_db::models::UserSessionModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::UserSessionRepositoryImpl;
use std::error::Error;
use uuid::Uuid;

impl UserSessionRepositoryImpl {
    pub async fn find_by_calculation_id(
        &self,
        calculation_id: Uuid,
    ) -> Result<Vec<UserSessionModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM user_sessions WHERE calculation_id = $1 ORDER BY started_at")
                .bind(calculation_id)
                .fetch_all(&mut **transaction)
                .await
                .map_err(db_error)?
        };

        rows.iter().map(UserSessionModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::calculation_repository::test_utils::test_utils::insert_test_quote;
    use crate::test_helper::setup_test_context;
    use uuid::Uuid;

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_find_by_calculation_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;

        let sessions = repos
            .user_session_repository
            .find_by_calculation_id(quote.calculation.id)
            .await?;
        assert_eq!(sessions, vec![quote.session]);

        let none = repos
            .user_session_repository
            .find_by_calculation_id(Uuid::new_v4())
            .await?;
        assert!(none.is_empty());
        Ok(())
    }
}
