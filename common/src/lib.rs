pub mod config;
pub mod games;
pub mod identifiers;
pub mod logger;
pub mod render;

pub use identifiers::*;
