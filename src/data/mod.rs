//! Dataset loading and the report pipeline
//!
//! This module loads the bike-sharing CSV into an immutable [`Dataset`] and
//! derives the five dashboard views from it. Each view reads the same input
//! and none depends on another.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `DataUnavailable`: file missing or a required column absent
//! - `TooLarge`: file exceeds the size limit
//! - `InvalidData`: a value that cannot be interpreted
//! - `Polars`: CSV reader errors
//!
//! [`Dataset`]: crate::types::Dataset

mod error;
mod kmeans;
mod loader;
mod report;
mod views;

pub use error::*;
pub use kmeans::*;
pub use loader::*;
pub use report::*;
pub use views::*;
