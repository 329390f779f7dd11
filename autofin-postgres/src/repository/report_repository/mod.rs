pub mod repo_impl;
pub mod daily_summary;
pub mod daily_approval_breakdown;
pub mod client_history;
pub mod popular_products;

pub use client_history::DEFAULT_HISTORY_LIMIT;
pub use repo_impl::ReportRepositoryImpl;
