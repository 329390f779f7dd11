use postgres_unit_of_work::Executor;

/// Rows map through `sqlx::FromRow` on `CalculationModel`.
pub struct CalculationRepositoryImpl {
    pub executor: Executor,
}

impl CalculationRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
