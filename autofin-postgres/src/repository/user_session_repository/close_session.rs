use autofin_api::ApiError;
use autofin_db::models::UserSessionModel;
use crate::error::db_error;
use crate::utils::TryFromRow;
use super::repo_impl::UserSessionRepositoryImpl;
use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

impl UserSessionRepositoryImpl {
    /// Sets `ended_at` on an open session.
    ///
    /// Fails with `NotFound` for an unknown or already closed session and with
    /// a check violation when `ended_at` precedes the start.
    pub async fn close_session(
        &self,
        id: Uuid,
        ended_at: DateTime<Utc>,
    ) -> Result<UserSessionModel, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                "UPDATE user_sessions SET ended_at = $2 WHERE id = $1 AND ended_at IS NULL RETURNING *",
            )
            .bind(id)
            .bind(ended_at)
            .fetch_optional(&mut **transaction)
            .await
            .map_err(db_error)?
        };

        match row {
            Some(row) => UserSessionModel::try_from_row(&row),
            None => Err(ApiError::NotFound(format!("Open user session {id}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::as_api_error;
    use crate::repository::calculation_repository::test_utils::test_utils::insert_test_quote;
    use crate::test_helper::setup_test_context;
    use autofin_api::ApiError;
    use chrono::Duration;

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_close_session() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;
        let ended_at = quote.session.started_at + Duration::minutes(25);

        let closed = repos
            .user_session_repository
            .close_session(quote.session.id, ended_at)
            .await?;
        assert_eq!(closed.ended_at, Some(ended_at));

        // Closing twice is an error
        let err = repos
            .user_session_repository
            .close_session(quote.session.id, ended_at)
            .await
            .unwrap_err();
        assert!(matches!(as_api_error(err.as_ref()), Some(ApiError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_close_before_start_violates_check() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;

        let err = repos
            .user_session_repository
            .close_session(quote.session.id, quote.session.started_at - Duration::seconds(1))
            .await
            .unwrap_err();
        assert_eq!(
            as_api_error(err.as_ref()),
            Some(&ApiError::CheckViolation {
                constraint: "user_sessions_period_check".to_string()
            })
        );
        Ok(())
    }
}
