//! # Libris - Single-user book catalog
//!
//! A form-driven catalog of books backed by a local SQLite file.
//!
//! Libris provides:
//! - A single `book` table with optional binary cover images
//! - CRUD operations, each a single parameterized SQL statement
//! - Bulk CSV import with strict column matching (all-or-nothing)
//! - A terminal surface (clap + tabled) and a local web surface (axum)

pub mod book;
pub mod config;
pub mod import;
pub mod server;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use book::{Book, BookDraft};
pub use import::ImportRow;
pub use storage::CatalogStore;

/// Result type alias for Libris operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Libris operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid book: {0}")]
    InvalidBook(String),

    #[error("CSV columns do not match the book table: {0}")]
    ColumnMismatch(String),

    #[error("Unsupported cover format '{0}' (expected jpg, jpeg, or png)")]
    UnsupportedCover(String),
}
