//! Book model - the single catalog entity
//!
//! Two shapes of the same record:
//! - `Book`: what reads return - id plus the text fields, never the cover
//!   blob (the list query excludes it on purpose)
//! - `BookDraft`: what writes take - the complete field set minus id,
//!   including the optional cover bytes ("full replace", never a merge)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cover uploads are restricted to these extensions, matching the
/// original upload filter. Bytes are stored raw - no re-encoding,
/// no size limit, no dimension checks.
pub const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// A catalog record as reads return it. The cover blob is fetched
/// separately via `CatalogStore::get_cover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the store on insert; immutable, never reused
    pub id: i64,
    pub author: String,
    pub language: String,
    pub title: String,
    pub summary: Option<String>,
    /// Stored as unvalidated text, round-tripped verbatim
    pub publish_date: Option<String>,
    pub notes: Option<String>,
}

/// The full-replace write payload: every field the table has, minus id.
///
/// `update` overwrites all columns with exactly these values - a `None`
/// cover clears any stored cover. Callers that want to keep the existing
/// cover must read it back first (the edit form does).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub author: String,
    pub language: String,
    pub title: String,
    pub summary: Option<String>,
    pub publish_date: Option<String>,
    pub notes: Option<String>,
    pub cover: Option<Vec<u8>>,
}

impl BookDraft {
    /// Check the required fields (author, language, title) are non-empty.
    ///
    /// Surfaced as a field-specific error rather than leaking the
    /// database's NOT NULL failure.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("author", &self.author),
            ("language", &self.language),
            ("title", &self.title),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidBook(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// Read cover bytes from a file, enforcing the extension filter.
pub fn read_cover(path: &Path) -> Result<Vec<u8>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if !COVER_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::UnsupportedCover(path.display().to_string()));
    }

    Ok(std::fs::read(path)?)
}

/// Guess the MIME type of stored cover bytes from their magic prefix.
///
/// Covers are stored raw, so this is the only type information we have
/// when serving them back over HTTP.
pub fn sniff_cover_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(author: &str, language: &str, title: &str) -> BookDraft {
        BookDraft {
            author: author.to_string(),
            language: language.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert!(draft("Mahfouz", "AR", "Palace Walk").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_required_fields() {
        for bad in [
            draft("", "AR", "Palace Walk"),
            draft("Mahfouz", "", "Palace Walk"),
            draft("Mahfouz", "AR", "   "),
        ] {
            let err = bad.validate().unwrap_err();
            assert!(matches!(err, Error::InvalidBook(_)));
        }
    }

    #[test]
    fn test_sniff_cover_mime() {
        assert_eq!(sniff_cover_mime(&[0x89, b'P', b'N', b'G', 0x0D]), "image/png");
        assert_eq!(sniff_cover_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_cover_mime(b"plain"), "application/octet-stream");
    }

    #[test]
    fn test_read_cover_rejects_unknown_extension() {
        let err = read_cover(Path::new("cover.gif")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCover(_)));
    }
}
