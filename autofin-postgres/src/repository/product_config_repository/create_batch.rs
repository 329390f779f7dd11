use autofin_db::models::ProductConfigModel;
use autofin_db::repository::CreateBatch;
use crate::error::db_error;
use super::repo_impl::ProductConfigRepositoryImpl;
use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;

#[async_trait]
impl CreateBatch<Postgres, ProductConfigModel> for ProductConfigRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ProductConfigModel>,
    ) -> Result<Vec<ProductConfigModel>, Box<dyn Error + Send + Sync>> {
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
                INSERT INTO product_configs (
                    id, code, name, product_type, min_amount, max_amount, min_months, max_months,
                    base_rate, conditions, is_active, valid_from, valid_to, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(item.id)
            .bind(item.code.as_str())
            .bind(item.name.as_str())
            .bind(item.product_type)
            .bind(item.min_amount)
            .bind(item.max_amount)
            .bind(item.min_months)
            .bind(item.max_months)
            .bind(item.base_rate)
            .bind(&item.conditions)
            .bind(item.is_active)
            .bind(item.valid_from)
            .bind(item.valid_to)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        }

        tracing::debug!(count = items.len(), "inserted product configs");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::as_api_error;
    use crate::test_helper::setup_test_context;
    use autofin_api::ApiError;
    use autofin_db::repository::CreateBatch;
    use rust_decimal_macros::dec;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_product;

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_inverted_amount_bounds_are_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let product_repo = &ctx.repos().product_config_repository;

        let mut product = create_test_product();
        product.min_amount = dec!(6000000);

        let err = product_repo.create_batch(vec![product]).await.unwrap_err();
        assert!(matches!(as_api_error(err.as_ref()), Some(ApiError::ValidationError(_))));
        Ok(())
    }

    #[tokio::test]
    #[serial_test::parallel]
    async fn test_duplicate_code_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let product_repo = &ctx.repos().product_config_repository;

        let first = create_test_product();
        let mut second = first.clone();
        second.id = Uuid::new_v4();

        product_repo.create_batch(vec![first]).await?;
        let err = product_repo.create_batch(vec![second]).await.unwrap_err();
        assert_eq!(
            as_api_error(err.as_ref()),
            Some(&ApiError::UniqueViolation {
                constraint: "product_configs_code_key".to_string()
            })
        );
        Ok(())
    }
}
