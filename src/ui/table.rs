use crate::book::Book;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct BookRow {
    #[tabled(rename = "Id")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Published")]
    pub published: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            language: book.language.clone(),
            published: book.publish_date.clone().unwrap_or_default(),
        }
    }
}

/// Render the catalog list as a terminal table
pub fn book_table(books: &[Book]) -> String {
    if books.is_empty() {
        return String::new();
    }

    let rows: Vec<BookRow> = books.iter().map(Into::into).collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}
