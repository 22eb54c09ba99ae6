//! Configuration types and parsing for the runtime core

pub mod parser;
pub mod types;

pub use parser::ConfigError;
pub use types::*;
