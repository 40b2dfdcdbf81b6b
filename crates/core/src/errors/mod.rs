//! Error types for check execution

mod builders;
mod display;
mod types;

pub use types::{Error, Result};
