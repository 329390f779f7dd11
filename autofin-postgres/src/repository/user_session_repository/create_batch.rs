use autofin_db::models::UserSessionModel;
use autofin_db::repository::CreateBatch;
use crate::error::db_error;
use super::repo_impl::UserSessionRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;

#[async_trait]
impl CreateBatch<Postgres, UserSessionModel> for UserSessionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<UserSessionModel>,
    ) -> Result<Vec<UserSessionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in &items {
            item.validate()?;
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO user_sessions (
                    id, user_id, client_id, calculation_id, ip_address, user_agent, started_at, ended_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id.as_str())
            .bind(item.client_id)
            .bind(item.calculation_id)
            .bind(item.ip_address.map(|ip| ip.to_string()))
            .bind(item.user_agent.as_deref())
            .bind(item.started_at)
            .bind(item.ended_at)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        }

        tracing::debug!(count = items.len(), "inserted user sessions");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::as_api_error;
    use crate::repository::calculation_repository::test_utils::test_utils::{
        create_test_session, insert_test_quote,
    };
    use crate::test_helper::setup_test_context;
    use autofin_api::ApiError;
    use autofin_db::repository::CreateBatch;
    use chrono::Duration;
    use uuid::Uuid;

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_session_ending_before_start_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;

        let mut session = create_test_session(&quote.calculation);
        session.ended_at = Some(session.started_at - Duration::minutes(1));

        let err = repos.user_session_repository.create_batch(vec![session]).await.unwrap_err();
        assert!(matches!(as_api_error(err.as_ref()), Some(ApiError::ValidationError(_))));
        Ok(())
    }

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_unknown_calculation_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;

        let mut session = create_test_session(&quote.calculation);
        session.calculation_id = Uuid::new_v4();

        let err = repos.user_session_repository.create_batch(vec![session]).await.unwrap_err();
        assert_eq!(
            as_api_error(err.as_ref()),
            Some(&ApiError::ForeignKeyViolation {
                constraint: "user_sessions_calculation_id_fkey".to_string()
            })
        );
        Ok(())
    }
}
