//! SQLite storage implementation for ValveQuote.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `valvequote-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for catalogs, casting types, customers, quotes and settings
//!
//! Pricing trees, casting series and finalized quotes are stored as JSON
//! documents, one row per document.
//!
//! ```text
//!   core (domain, traits)
//!          │
//!          ▼
//!   storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod casting;
pub mod catalogs;
pub mod customers;
pub mod quotes;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from valvequote-core for convenience
pub use valvequote_core::errors::{DatabaseError, Error, Result};
