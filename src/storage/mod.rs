//! Storage Accessor - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - book(id, author, language, title, summary, publish_date, notes, image)
//!
//! A `CatalogStore` is acquired per user action and released on drop;
//! there is no shared ambient handle.

pub mod schema;
pub mod sqlite;

pub use sqlite::{CatalogStore, CatalogStats};
