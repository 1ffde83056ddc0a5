//! SQLite mirror for OAC records.
//!
//! This crate is the only place where Diesel dependencies exist. It implements
//! [`oac_core::RecordStore`] on a local SQLite file:
//! - Database connection pooling and migrations
//! - A single writer task running each batch in an immediate transaction
//! - `REPLACE INTO` upserts against a unique index on the natural key
//!
//! ```text
//! oac-core (RecordStore)
//!         │
//!         ▼
//!  OacRepository ──► WriteHandle ──► SQLite file
//! ```

pub mod db;
pub mod errors;
pub mod oac;
pub mod schema;

pub use db::{create_pool, get_connection, init, open, run_migrations, DbConnection, DbPool, WriteHandle};
pub use errors::StorageError;
pub use oac::OacRepository;

pub use oac_core::errors::{Error, Result};
