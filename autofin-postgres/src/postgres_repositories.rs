use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::repository::{
    CalculationRepositoryImpl, ClientRepositoryImpl, MaintenanceRepositoryImpl,
    ProductConfigRepositoryImpl, ReportRepositoryImpl, UserSessionRepositoryImpl,
    VehicleRepositoryImpl,
};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create all repositories sharing a single transaction
    pub async fn create_quoting_repositories(&self) -> Result<QuotingRepositories, sqlx::Error> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);

        Ok(QuotingRepositories {
            client_repository: Arc::new(ClientRepositoryImpl::new(executor.clone())),
            vehicle_repository: Arc::new(VehicleRepositoryImpl::new(executor.clone())),
            product_config_repository: Arc::new(ProductConfigRepositoryImpl::new(executor.clone())),
            calculation_repository: Arc::new(CalculationRepositoryImpl::new(executor.clone())),
            user_session_repository: Arc::new(UserSessionRepositoryImpl::new(executor.clone())),
            report_repository: Arc::new(ReportRepositoryImpl::new(executor.clone())),
            maintenance_repository: Arc::new(MaintenanceRepositoryImpl::new(executor.clone())),
            executor,
        })
    }
}

/// Repositories bound to one open transaction.
///
/// Dropping the value without calling [`QuotingRepositories::commit`] rolls
/// every write back.
pub struct QuotingRepositories {
    pub executor: Executor,
    pub client_repository: Arc<ClientRepositoryImpl>,
    pub vehicle_repository: Arc<VehicleRepositoryImpl>,
    pub product_config_repository: Arc<ProductConfigRepositoryImpl>,
    pub calculation_repository: Arc<CalculationRepositoryImpl>,
    pub user_session_repository: Arc<UserSessionRepositoryImpl>,
    pub report_repository: Arc<ReportRepositoryImpl>,
    pub maintenance_repository: Arc<MaintenanceRepositoryImpl>,
}

impl QuotingRepositories {
    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let transaction = {
            let mut tx = self.executor.tx.lock().await;
            tx.take().ok_or("Transaction has been consumed")?
        };
        transaction.commit().await?;
        tracing::info!("transaction committed");
        Ok(())
    }
}
