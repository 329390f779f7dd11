pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load_batch;
pub mod find_by_vin_hash;
pub mod upsert_by_vin_hash;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::VehicleRepositoryImpl;
