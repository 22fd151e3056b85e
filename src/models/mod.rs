//! Data models for the brewery review application.
//!
//! Wire shapes are camelCase to match the frontend contract.

mod brewery;
mod preferences;
mod review;

pub use brewery::*;
pub use preferences::*;
pub use review::*;
