//! Libris CLI - Command-line interface for the book catalog

use clap::{Parser, Subcommand};
use libris::book::{read_cover, BookDraft};
use libris::storage::CatalogStore;
use libris::ui::{self, Icons};
use libris::{config, import};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "libris")]
#[command(version = "0.1.0")]
#[command(about = "Single-user book catalog backed by a local SQLite file")]
#[command(long_about = r#"
Libris keeps a book catalog in one SQLite file, enabling:
  • Add, show, edit, and delete book records (edits are full replaces)
  • Cover images (jpg, jpeg, png), stored as raw bytes
  • Bulk CSV import with strict column matching
  • A terminal table view and a local web form UI

Example usage:
  libris add --author "Tayeb Salih" --language AR --title "Season of Migration to the North"
  libris list
  libris import books.csv
  libris serve --port 7070
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new book to the catalog
    Add {
        /// Author (required, non-empty)
        #[arg(short, long)]
        author: String,

        /// Language (required, non-empty)
        #[arg(short, long)]
        language: String,

        /// Title (required, non-empty)
        #[arg(short, long)]
        title: String,

        /// Short summary
        #[arg(short, long)]
        summary: Option<String>,

        /// Publication date, stored as given
        #[arg(short, long)]
        publish_date: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Cover image file (jpg, jpeg, png)
        #[arg(short, long)]
        cover: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List all books as a table (covers excluded)
    List {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show one book in detail
    Show {
        /// Book id
        id: i64,

        /// Write the cover bytes to this file, if the book has one
        #[arg(short, long)]
        cover_out: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Replace every field of a book (full replace, not a patch)
    Edit {
        /// Book id
        id: i64,

        /// Author (required, non-empty)
        #[arg(short, long)]
        author: String,

        /// Language (required, non-empty)
        #[arg(short, long)]
        language: String,

        /// Title (required, non-empty)
        #[arg(short, long)]
        title: String,

        /// Short summary
        #[arg(short, long)]
        summary: Option<String>,

        /// Publication date, stored as given
        #[arg(short, long)]
        publish_date: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,

        /// New cover image; without this flag the existing cover is kept
        #[arg(short, long)]
        cover: Option<PathBuf>,

        /// Remove the stored cover
        #[arg(long, conflicts_with = "cover")]
        drop_cover: bool,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Delete a book by id
    Delete {
        /// Book id
        id: i64,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Bulk-append books from a CSV file (all-or-nothing)
    Import {
        /// CSV file with columns author, language, title, summary, publish_date, notes
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show catalog statistics
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Start the local web UI
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7070")]
        port: u16,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn open_store(database: Option<PathBuf>) -> anyhow::Result<(CatalogStore, PathBuf)> {
    let database = config::resolve_database(database)?;
    config::ensure_db_dir(&database)?;
    let store = CatalogStore::open(&database)?;
    Ok((store, database))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Add {
            author,
            language,
            title,
            summary,
            publish_date,
            notes,
            cover,
            database,
        } => {
            let (store, database) = open_store(database)?;
            tracing::debug!("Adding '{}' to {:?}", title, database);

            let cover = match cover {
                Some(path) => Some(read_cover(&path)?),
                None => None,
            };

            let draft = BookDraft {
                author,
                language,
                title,
                summary,
                publish_date,
                notes,
                cover,
            };

            let id = store.insert_book(&draft)?;
            ui::success(&format!("Added book #{}", id));
        }

        Commands::List { database } => {
            let (store, database) = open_store(database)?;
            let books = store.list_books()?;

            if books.is_empty() {
                println!("∅ The catalog is empty ({:?}).", database);
            } else {
                ui::header("Book catalog");
                println!("{}", ui::book_table(&books));
                ui::info("Total", &books.len().to_string());
            }
        }

        Commands::Show { id, cover_out, database } => {
            let (store, _) = open_store(database)?;

            match store.get_book(id)? {
                None => ui::warn(&format!("Book #{} not found", id)),
                Some(book) => {
                    ui::section(&book.title);
                    ui::detail_row("Id", &book.id.to_string());
                    ui::detail_row("Author", &book.author);
                    ui::detail_row("Language", &book.language);
                    ui::detail_row("Published", book.publish_date.as_deref().unwrap_or("-"));
                    ui::detail_row("Summary", book.summary.as_deref().unwrap_or("-"));
                    ui::detail_row("Notes", book.notes.as_deref().unwrap_or("-"));

                    match store.get_cover(id)? {
                        Some(bytes) => {
                            ui::detail_row("Cover", &format!("{} {} bytes", Icons::IMAGE, bytes.len()));
                            if let Some(out) = cover_out {
                                std::fs::write(&out, &bytes)?;
                                ui::success(&format!("Cover written to {:?}", out));
                            }
                        }
                        None => {
                            ui::detail_row("Cover", "none");
                            if cover_out.is_some() {
                                ui::warn("No cover to write");
                            }
                        }
                    }
                }
            }
        }

        Commands::Edit {
            id,
            author,
            language,
            title,
            summary,
            publish_date,
            notes,
            cover,
            drop_cover,
            database,
        } => {
            let (store, _) = open_store(database)?;

            // Full replace: when no new cover is given the existing one is
            // read back and written again, like the original edit form.
            let cover = if drop_cover {
                None
            } else if let Some(path) = cover {
                Some(read_cover(&path)?)
            } else {
                store.get_cover(id)?
            };

            let draft = BookDraft {
                author,
                language,
                title,
                summary,
                publish_date,
                notes,
                cover,
            };

            if store.update_book(id, &draft)? {
                ui::success(&format!("Updated book #{}", id));
            } else {
                ui::warn(&format!("Book #{} not found", id));
            }
        }

        Commands::Delete { id, database } => {
            let (store, _) = open_store(database)?;

            if store.delete_book(id)? {
                ui::success(&format!("Deleted book #{}", id));
            } else {
                ui::warn(&format!("Book #{} not found", id));
            }
        }

        Commands::Import { file, database } => {
            let (mut store, database) = open_store(database)?;

            println!("{} Importing {:?} into {:?}", Icons::IMPORT, file, database);
            let rows = import::read_rows(std::fs::File::open(&file)?)?;

            let spinner = ui::Spinner::new(&format!("Appending {} rows", rows.len()));
            let result = store.append_rows(&rows);
            spinner.finish_and_clear();

            match result {
                Ok(imported) => ui::success(&format!("Imported {} books", imported)),
                Err(e) => {
                    ui::error(&format!("Import failed, nothing appended: {}", e));
                    return Err(e.into());
                }
            }
        }

        Commands::Stats { database } => {
            let (store, database) = open_store(database)?;
            let stats = store.stats()?;

            println!("{} Catalog statistics ({:?})", Icons::STATS, database);
            println!("------------------------------------");
            println!("{}", stats);
        }

        Commands::Serve { port, database } => {
            let database = config::resolve_database(database)?;
            config::ensure_db_dir(&database)?;
            println!("{} Database: {:?}", Icons::DATABASE, database);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(libris::server::start_server(port, database))?;
        }
    }

    Ok(())
}
