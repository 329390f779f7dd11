use postgres_unit_of_work::Executor;

/// Read-only aggregations over `calculations`.
///
/// Days are UTC calendar days of `created_at`; date ranges are inclusive.
pub struct ReportRepositoryImpl {
    pub executor: Executor,
}

impl ReportRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
