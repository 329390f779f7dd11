pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod find_by_code;
pub mod find_active_on;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ProductConfigRepositoryImpl;
