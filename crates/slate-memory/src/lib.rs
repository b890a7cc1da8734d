//! An in-memory document store implementing [`slate_query::Model`].
//!
//! Executes the same filter, sort, projection and one-level populate
//! vocabulary a MongoDB-backed model would, without a server. Used to drive
//! reverse population in tests and benchmarks.

mod collection;
mod config;
mod database;
mod error;
mod eval;
mod populate;
mod projection;
mod sort;

pub use collection::MemoryCollection;
pub use config::CollectionConfig;
pub use database::MemoryDatabase;
pub use error::MemoryError;
