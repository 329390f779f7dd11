pub mod models;
pub mod repository;
pub mod seed;
pub mod utils;

pub use models::*;
