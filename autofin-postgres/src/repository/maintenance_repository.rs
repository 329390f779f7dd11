//! Bulk clearing and referential-integrity probes.

use crate::error::db_error;
use postgres_unit_of_work::Executor;
use std::error::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCounts {
    pub clients: i64,
    pub vehicles: i64,
    pub product_configs: i64,
    pub calculations: i64,
    pub user_sessions: i64,
}

pub struct MaintenanceRepositoryImpl {
    pub executor: Executor,
}

impl MaintenanceRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    async fn execute(&self, sql: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::raw_sql(sql)
            .execute(&mut **transaction)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn count(&self, sql: &str) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let count: i64 = sqlx::query_scalar(sql)
            .fetch_one(&mut **transaction)
            .await
            .map_err(db_error)?;
        Ok(count)
    }

    /// Empties `clients` together with every calculation and session.
    /// Vehicles and products are kept.
    pub async fn truncate_clients_cascade(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        warn!("truncating clients with cascade");
        self.execute("TRUNCATE clients CASCADE").await
    }

    pub async fn clear_all(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        warn!("clearing all quoting tables");
        self.execute("TRUNCATE user_sessions, calculations, clients, vehicles, product_configs")
            .await
    }

    /// Calculations whose client or vehicle no longer resolves.
    pub async fn orphaned_calculations(&self) -> Result<i64, Box<dyn Error + Send + Sync>> {
        self.count(
            r#"
            SELECT COUNT(*) FROM calculations calc
            LEFT JOIN clients c ON c.id = calc.client_id
            LEFT JOIN vehicles v ON v.id = calc.vehicle_id
            WHERE c.id IS NULL OR v.id IS NULL
            "#,
        )
        .await
    }

    /// Sessions whose calculation or client no longer resolves.
    pub async fn orphaned_sessions(&self) -> Result<i64, Box<dyn Error + Send + Sync>> {
        self.count(
            r#"
            SELECT COUNT(*) FROM user_sessions s
            LEFT JOIN calculations calc ON calc.id = s.calculation_id
            LEFT JOIN clients c ON c.id = s.client_id
            WHERE calc.id IS NULL OR c.id IS NULL
            "#,
        )
        .await
    }

    pub async fn table_counts(&self) -> Result<TableCounts, Box<dyn Error + Send + Sync>> {
        Ok(TableCounts {
            clients: self.count("SELECT COUNT(*) FROM clients").await?,
            vehicles: self.count("SELECT COUNT(*) FROM vehicles").await?,
            product_configs: self.count("SELECT COUNT(*) FROM product_configs").await?,
            calculations: self.count("SELECT COUNT(*) FROM calculations").await?,
            user_sessions: self.count("SELECT COUNT(*) FROM user_sessions").await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::calculation_repository::test_utils::test_utils::insert_test_quote;
    use crate::repository::seed::seed_database;
    use crate::test_helper::{setup_test_context, TEST_ENCRYPTION_KEY};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_truncate_clients_leaves_no_orphans() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;
        insert_test_quote(repos).await?;

        let maintenance = &repos.maintenance_repository;
        assert_eq!(maintenance.orphaned_calculations().await?, 0);
        assert_eq!(maintenance.orphaned_sessions().await?, 0);

        let before = maintenance.table_counts().await?;
        maintenance.truncate_clients_cascade().await?;
        let after = maintenance.table_counts().await?;

        assert_eq!(after.clients, 0);
        assert_eq!(after.calculations, 0);
        assert_eq!(after.user_sessions, 0);
        assert_eq!(after.vehicles, before.vehicles);
        assert_eq!(after.product_configs, before.product_configs);
        assert_eq!(maintenance.orphaned_calculations().await?, 0);
        assert_eq!(maintenance.orphaned_sessions().await?, 0);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_clear_all() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;

        repos.maintenance_repository.clear_all().await?;
        assert_eq!(
            repos.maintenance_repository.table_counts().await?,
            super::TableCounts::default()
        );
        Ok(())
    }
}
