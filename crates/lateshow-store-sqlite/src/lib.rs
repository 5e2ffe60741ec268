//! SQLite backend for the Late Show store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod bulk;
mod rows;
mod schema;
mod store;

pub mod error;

pub use bulk::{LoadReport, LoadRow};
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
