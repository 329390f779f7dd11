use autofin_db::models::CalculationModel;
use autofin_db::repository::{Page, PageRequest};
use crate::error::db_error;
use super::repo_impl::CalculationRepositoryImpl;
use std::error::Error;
use uuid::Uuid;

impl CalculationRepositoryImpl {
    /// A client's calculations, newest first.
    pub async fn find_by_client_id(
        &self,
        client_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<CalculationModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calculations WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(&mut **transaction)
            .await
            .map_err(db_error)?;

        let items = sqlx::query_as::<_, CalculationModel>(
            r#"
            SELECT * FROM calculations
            WHERE client_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(client_id)
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&mut **transaction)
        .await
        .map_err(db_error)?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use autofin_db::repository::{CreateBatch, PageRequest};
    use chrono::Duration;
    use super::super::test_utils::test_utils::{create_test_calculation, insert_test_quote};

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_find_by_client_id_pages_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let quote = insert_test_quote(repos).await?;

        let mut older = create_test_calculation(quote.client.id, quote.vehicle.id);
        older.created_at = quote.calculation.created_at - Duration::days(1);
        let mut oldest = create_test_calculation(quote.client.id, quote.vehicle.id);
        oldest.created_at = quote.calculation.created_at - Duration::days(2);
        repos
            .calculation_repository
            .create_batch(vec![oldest.clone(), older.clone()])
            .await?;

        let first = repos
            .calculation_repository
            .find_by_client_id(quote.client.id, PageRequest::new(2, 0))
            .await?;
        assert_eq!(first.total, 3);
        assert!(first.has_more());
        let ids: Vec<_> = first.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![quote.calculation.id, older.id]);

        let second = repos
            .calculation_repository
            .find_by_client_id(quote.client.id, PageRequest::for_page(2, 2))
            .await?;
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, oldest.id);
        assert!(!second.has_more());
        Ok(())
    }
}
