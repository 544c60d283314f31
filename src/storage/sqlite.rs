//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::book::{Book, BookDraft};
use crate::import::ImportRow;
use super::schema;

/// SQLite-backed storage for the book catalog.
///
/// Open one per user action; the connection closes when the store drops.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Read Operations ==========

    /// All books in storage order. The image column is excluded from the
    /// query; covers are fetched one at a time via `get_cover`.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, author, language, title, summary, publish_date, notes FROM book",
        )?;

        let books = stmt
            .query_map([], |row| self.row_to_book(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(books)
    }

    /// Get a single book by id, without its cover
    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        self.conn
            .query_row(
                "SELECT id, author, language, title, summary, publish_date, notes FROM book WHERE id = ?1",
                [id],
                |row| self.row_to_book(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Fetch only the cover bytes for one book.
    ///
    /// Returns `None` both when the row is missing and when the row has
    /// no cover - the caller cannot tell the two apart, matching the
    /// detail view's needs.
    pub fn get_cover(&self, id: i64) -> Result<Option<Vec<u8>>> {
        let blob: Option<Option<Vec<u8>>> = self
            .conn
            .query_row("SELECT image FROM book WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;

        Ok(blob.flatten())
    }

    /// Count all books
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM book", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Write Operations ==========

    /// Insert a new book and return the id the store assigned.
    ///
    /// Required fields are validated before the statement runs.
    pub fn insert_book(&self, draft: &BookDraft) -> Result<i64> {
        draft.validate()?;

        self.conn.execute(
            r#"
            INSERT INTO book (author, language, title, summary, publish_date, notes, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                draft.author,
                draft.language,
                draft.title,
                draft.summary,
                draft.publish_date,
                draft.notes,
                draft.cover,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Full replace: overwrite every column of one book with the draft.
    ///
    /// Returns `false` when no row matched the id; the caller decides
    /// whether that is worth surfacing.
    pub fn update_book(&self, id: i64, draft: &BookDraft) -> Result<bool> {
        draft.validate()?;

        let affected = self.conn.execute(
            r#"
            UPDATE book
            SET author = ?1, language = ?2, title = ?3, summary = ?4,
                publish_date = ?5, notes = ?6, image = ?7
            WHERE id = ?8
            "#,
            params![
                draft.author,
                draft.language,
                draft.title,
                draft.summary,
                draft.publish_date,
                draft.notes,
                draft.cover,
                id,
            ],
        )?;

        Ok(affected > 0)
    }

    /// Delete a book. Returns `false` when the id was absent.
    pub fn delete_book(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM book WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // ========== Bulk Operations ==========

    /// Append parsed CSV rows in one transaction, no per-row validation.
    ///
    /// A row the database itself rejects (an empty required cell became
    /// NULL) aborts and rolls back the entire batch. Returns the number
    /// of rows appended.
    pub fn append_rows(&mut self, rows: &[ImportRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;

        for row in rows {
            tx.execute(
                r#"
                INSERT INTO book (author, language, title, summary, publish_date, notes, image)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    row.author,
                    row.language,
                    row.title,
                    row.summary,
                    row.publish_date,
                    row.notes,
                    row.image,
                ],
            )?;
        }

        tx.commit()?;
        Ok(rows.len())
    }

    // ========== Statistics ==========

    /// Get catalog statistics
    pub fn stats(&self) -> Result<CatalogStats> {
        let with_cover: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM book WHERE image IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        let languages: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT language) FROM book",
            [],
            |row| row.get(0),
        )?;

        Ok(CatalogStats {
            books: self.count_books()?,
            with_cover: with_cover as usize,
            languages: languages as usize,
        })
    }

    /// Helper to convert a row to a Book
    fn row_to_book(&self, row: &rusqlite::Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            author: row.get(1)?,
            language: row.get(2)?,
            title: row.get(3)?,
            summary: row.get(4)?,
            publish_date: row.get(5)?,
            notes: row.get(6)?,
        })
    }
}

/// Catalog statistics
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub books: usize,
    pub with_cover: usize,
    pub languages: usize,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog Statistics:")?;
        writeln!(f, "  Books: {}", self.books)?;
        writeln!(f, "  With cover: {}", self.with_cover)?;
        writeln!(f, "  Languages: {}", self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample_draft(title: &str) -> BookDraft {
        BookDraft {
            author: "Naguib Mahfouz".to_string(),
            language: "AR".to_string(),
            title: title.to_string(),
            summary: Some("A Cairo family saga".to_string()),
            publish_date: Some("1956-01-01".to_string()),
            notes: None,
            cover: None,
        }
    }

    fn sample_row(title: &str) -> ImportRow {
        ImportRow {
            author: Some("Tayeb Salih".to_string()),
            language: Some("AR".to_string()),
            title: Some(title.to_string()),
            summary: None,
            publish_date: Some("1966".to_string()),
            notes: Some("paperback".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = CatalogStore::open_in_memory().unwrap();

        let first = store.insert_book(&sample_draft("Palace Walk")).unwrap();
        let second = store.insert_book(&sample_draft("Palace of Desire")).unwrap();

        assert_eq!(first, 1);
        assert!(second > first);

        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Palace Walk");
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let store = CatalogStore::open_in_memory().unwrap();

        let first = store.insert_book(&sample_draft("Palace Walk")).unwrap();
        assert!(store.delete_book(first).unwrap());

        let second = store.insert_book(&sample_draft("Sugar Street")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_insert_rejects_empty_required_field() {
        let store = CatalogStore::open_in_memory().unwrap();

        let mut draft = sample_draft("Palace Walk");
        draft.author = String::new();

        let err = store.insert_book(&draft).unwrap_err();
        assert!(matches!(err, Error::InvalidBook(_)));
        assert_eq!(store.count_books().unwrap(), 0);
    }

    #[test]
    fn test_get_book_by_id() {
        let store = CatalogStore::open_in_memory().unwrap();
        let id = store.insert_book(&sample_draft("Palace Walk")).unwrap();

        let book = store.get_book(id).unwrap().unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.publish_date.as_deref(), Some("1956-01-01"));

        assert!(store.get_book(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_update_is_full_replace() {
        let store = CatalogStore::open_in_memory().unwrap();
        let id = store.insert_book(&sample_draft("Palace Walk")).unwrap();

        let replacement = BookDraft {
            author: "Edward Said".to_string(),
            language: "EN".to_string(),
            title: "Orientalism".to_string(),
            summary: None,
            publish_date: None,
            notes: None,
            cover: None,
        };
        assert!(store.update_book(id, &replacement).unwrap());

        let book = store.get_book(id).unwrap().unwrap();
        assert_eq!(book.author, "Edward Said");
        // Unsupplied optionals are overwritten, not preserved
        assert_eq!(book.summary, None);
        assert_eq!(book.publish_date, None);
    }

    #[test]
    fn test_update_missing_id_reports_not_found() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert_book(&sample_draft("Palace Walk")).unwrap();

        assert!(!store.update_book(999, &sample_draft("Ghost")).unwrap());

        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Palace Walk");
    }

    #[test]
    fn test_delete_removes_book_and_cover() {
        let store = CatalogStore::open_in_memory().unwrap();

        let mut draft = sample_draft("Palace Walk");
        draft.cover = Some(vec![0xFF, 0xD8, 0xFF, 0x01]);
        let id = store.insert_book(&draft).unwrap();

        assert!(store.delete_book(id).unwrap());
        assert!(store.list_books().unwrap().is_empty());
        assert!(store.get_cover(id).unwrap().is_none());

        // Deleting again is a not-found, not an error
        assert!(!store.delete_book(id).unwrap());
    }

    #[test]
    fn test_cover_round_trips_byte_identical() {
        let store = CatalogStore::open_in_memory().unwrap();

        let bytes: Vec<u8> = (0..=255).collect();
        let mut draft = sample_draft("Season of Migration");
        draft.cover = Some(bytes.clone());

        let id = store.insert_book(&draft).unwrap();
        assert_eq!(store.get_cover(id).unwrap().unwrap(), bytes);
    }

    #[test]
    fn test_cover_absent_when_never_uploaded() {
        let store = CatalogStore::open_in_memory().unwrap();
        let id = store.insert_book(&sample_draft("Palace Walk")).unwrap();

        assert!(store.get_cover(id).unwrap().is_none());
        assert!(store.get_cover(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_update_with_none_cover_clears_it() {
        let store = CatalogStore::open_in_memory().unwrap();

        let mut draft = sample_draft("Palace Walk");
        draft.cover = Some(vec![1, 2, 3]);
        let id = store.insert_book(&draft).unwrap();

        draft.cover = None;
        assert!(store.update_book(id, &draft).unwrap());
        assert!(store.get_cover(id).unwrap().is_none());
    }

    #[test]
    fn test_append_rows_all_inserted() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store.insert_book(&sample_draft("Palace Walk")).unwrap();

        let rows = vec![sample_row("Season of Migration"), sample_row("The Wedding of Zein")];
        assert_eq!(store.append_rows(&rows).unwrap(), 2);
        assert_eq!(store.count_books().unwrap(), 3);

        let books = store.list_books().unwrap();
        let imported = books.iter().find(|b| b.title == "The Wedding of Zein").unwrap();
        assert_eq!(imported.author, "Tayeb Salih");
        assert_eq!(imported.summary, None);
        assert_eq!(imported.notes.as_deref(), Some("paperback"));
    }

    #[test]
    fn test_append_rows_rolls_back_on_constraint_failure() {
        let mut store = CatalogStore::open_in_memory().unwrap();

        let mut bad = sample_row("Broken");
        bad.author = None; // NOT NULL column

        let rows = vec![sample_row("Fine"), bad];
        assert!(store.append_rows(&rows).is_err());

        // All-or-nothing: the good row must not survive
        assert_eq!(store.count_books().unwrap(), 0);
    }

    #[test]
    fn test_file_backed_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.sqlite");

        let id = {
            let store = CatalogStore::open(&path).unwrap();
            store.insert_book(&sample_draft("Palace Walk")).unwrap()
        };

        let store = CatalogStore::open(&path).unwrap();
        let book = store.get_book(id).unwrap().unwrap();
        assert_eq!(book.title, "Palace Walk");
    }

    #[test]
    fn test_stats() {
        let store = CatalogStore::open_in_memory().unwrap();

        let mut with_cover = sample_draft("Palace Walk");
        with_cover.cover = Some(vec![9]);
        store.insert_book(&with_cover).unwrap();

        let mut english = sample_draft("Orientalism");
        english.language = "EN".to_string();
        store.insert_book(&english).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.books, 2);
        assert_eq!(stats.with_cover, 1);
        assert_eq!(stats.languages, 2);
    }
}
