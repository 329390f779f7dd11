pub mod error;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;
pub mod workflow;

pub use postgres_repositories::{PostgresRepositories, QuotingRepositories};
pub use workflow::{ManagerContext, QuoteOutcome, QuoteRequest, QuoteWorkflow};

#[cfg(test)]
pub mod test_helper;
