//! SQLite backend for the Spotter schedule store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every mutating operation is
//! a single transaction on that connection; the capacity counter is only
//! ever written through the [`capacity`] guard.

mod capacity;
mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
