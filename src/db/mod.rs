//! Database module: models, schema and the SQLite-backed repository.
//!
//! Layout:
//! - `models.rs`: the darts row, request payloads and update semantics
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `repository.rs`: storage-agnostic `DartsRepository` trait
//! - `sqlite.rs`: `DartsStorage`, the sqlx implementation

pub mod models;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use models::{DartsInput, DartsPatch, DartsRecord, DartsUpdate, Validate};
pub use repository::{DartsRepository, Pagination};
pub use schema::SQLITE_INIT;
pub use sqlite::{DartsStorage, SqlitePool, connect};
