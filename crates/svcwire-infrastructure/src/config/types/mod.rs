//! Configuration types module

pub mod cache;
pub mod generator;
pub mod logging;

// Re-export main types
pub use cache::*;
pub use generator::*;
pub use logging::*;
