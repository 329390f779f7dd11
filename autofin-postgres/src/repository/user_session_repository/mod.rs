pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod find_by_calculation_id;
pub mod close_session;

pub use repo_impl::UserSessionRepositoryImpl;
