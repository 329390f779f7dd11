pub mod calculator;
pub mod configurator;
pub mod scoring;

pub use calculator::*;
pub use configurator::*;
pub use scoring::*;
