//! Core types and trait definitions for the Spotter scheduling engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod clock;
pub mod enrollment;
pub mod error;
pub mod event;
pub mod policy;
pub mod program;
pub mod schedule;
pub mod store;
pub mod term;
pub mod workout;

pub use error::{Error, ErrorKind, Result};
