pub mod calculation;
pub mod client;
pub mod identifiable;
pub mod product_config;
pub mod report;
pub mod user_session;
pub mod vehicle;

// Re-exports
pub use calculation::*;
pub use client::*;
pub use identifiable::*;
pub use product_config::*;
pub use report::*;
pub use user_session::*;
pub use vehicle::*;
