//! Database schema definitions

/// SQL to create the book table.
///
/// AUTOINCREMENT keeps ids strictly increasing and never reused after a
/// delete. Idempotent; run on every open. There is no migration logic -
/// a table with a drifted shape is undefined behavior.
pub const CREATE_BOOK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS book (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT NOT NULL,
    language TEXT NOT NULL,
    title TEXT NOT NULL,
    summary TEXT,
    publish_date DATE,
    notes TEXT,
    image BLOB
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_BOOK_TABLE]
}
