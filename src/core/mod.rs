//! Core types and constants for target tracking

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
