//! Bulk CSV import
//!
//! The header row must carry exactly the book columns
//! (author, language, title, summary, publish_date, notes), in any
//! order, optionally plus image. Anything else is a schema mismatch and
//! fails the import before a single row is read.
//!
//! Rows are not validated: empty cells become NULL and whatever text a
//! cell holds is appended verbatim. The append itself runs in one
//! transaction (all-or-nothing), so a row the database rejects takes the
//! whole batch down with it.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// Columns the CSV must contain, matching the book table
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "author",
    "language",
    "title",
    "summary",
    "publish_date",
    "notes",
];

/// Columns the CSV may additionally contain.
///
/// An image cell is text and is stored as its raw bytes - cover import
/// via CSV is carried for column compatibility, not because it is
/// practical.
pub const OPTIONAL_COLUMNS: [&str; 1] = ["image"];

/// One parsed CSV row, exactly as the source had it.
///
/// Every field is optional here: the store's NOT NULL constraints are
/// the only gate, and they reject the whole batch, not the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    pub author: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub publish_date: Option<String>,
    pub notes: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// Serde shape for one CSV record; empty cells deserialize to None
#[derive(Debug, Deserialize)]
struct CsvRecord {
    author: Option<String>,
    language: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    publish_date: Option<String>,
    notes: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl From<CsvRecord> for ImportRow {
    fn from(rec: CsvRecord) -> Self {
        Self {
            author: rec.author,
            language: rec.language,
            title: rec.title,
            summary: rec.summary,
            publish_date: rec.publish_date,
            notes: rec.notes,
            image: rec.image.map(String::into_bytes),
        }
    }
}

/// Parse CSV data into rows ready for `CatalogStore::append_rows`.
///
/// Fails with `ColumnMismatch` before reading any row when the header
/// set differs from the book table.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut rows = Vec::new();
    for record in rdr.deserialize::<CsvRecord>() {
        rows.push(record?.into());
    }
    Ok(rows)
}

/// Require the header set to match the table columns exactly
fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let mut seen = HashSet::new();

    for header in headers {
        if !REQUIRED_COLUMNS.contains(&header) && !OPTIONAL_COLUMNS.contains(&header) {
            return Err(Error::ColumnMismatch(format!("unknown column '{}'", header)));
        }
        if !seen.insert(header) {
            return Err(Error::ColumnMismatch(format!("duplicate column '{}'", header)));
        }
    }

    for required in REQUIRED_COLUMNS {
        if !seen.contains(required) {
            return Err(Error::ColumnMismatch(format!("missing column '{}'", required)));
        }
    }

    Ok(())
}
