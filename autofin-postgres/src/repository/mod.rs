pub mod calculation_repository;
pub mod client_repository;
pub mod db_init;
pub mod maintenance_repository;
pub mod product_config_repository;
pub mod report_repository;
pub mod seed;
pub mod user_session_repository;
pub mod vehicle_repository;

pub use calculation_repository::CalculationRepositoryImpl;
pub use client_repository::ClientRepositoryImpl;
pub use maintenance_repository::MaintenanceRepositoryImpl;
pub use product_config_repository::ProductConfigRepositoryImpl;
pub use report_repository::ReportRepositoryImpl;
pub use user_session_repository::UserSessionRepositoryImpl;
pub use vehicle_repository::VehicleRepositoryImpl;
