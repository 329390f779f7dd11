pub mod calculation;
pub mod client;
pub mod financing;
pub mod product;
pub mod vehicle;

pub use calculation::*;
pub use client::*;
pub use financing::*;
pub use product::*;
pub use vehicle::*;
