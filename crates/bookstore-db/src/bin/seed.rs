//! # Seed Data Loader
//!
//! Populates the catalog with a starter set of books for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./bookstore.db (default)
//! cargo run -p bookstore-db --bin seed
//!
//! # Specify database path
//! cargo run -p bookstore-db --bin seed -- --db ./data/bookstore.db
//! ```
//!
//! Seeding is skipped when the catalog already has books, so it is safe to
//! run before every server start.

use std::env;

use anyhow::Context;
use bookstore_core::{Book, Money};
use bookstore_db::migrations::migration_status;
use bookstore_db::{Database, DbConfig};

/// (title, author, publisher, isbn, classification, category, pages, price in cents)
type SeedBook = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, i64, i64);

const BOOKS: &[SeedBook] = &[
    ("Les Miserables", "Victor Hugo", "Signet", "978-0451419439", "Fiction", "Classic", 1488, 995),
    ("Team of Rivals", "Doris Kearns Goodwin", "Simon & Schuster", "978-0743270755", "Non-Fiction", "Biography", 944, 1458),
    ("The Snowball", "Alice Schroeder", "Bantam", "978-0553384611", "Non-Fiction", "Biography", 832, 2154),
    ("American Ulysses", "Ronald C. White", "Random House", "978-0812981254", "Non-Fiction", "Biography", 864, 1161),
    ("Unbroken", "Laura Hillenbrand", "Random House", "978-0812974492", "Non-Fiction", "Historical", 528, 1333),
    ("The Great Train Robbery", "Michael Crichton", "Vintage", "978-0804171281", "Fiction", "Historical Fiction", 288, 1595),
    ("Deep Work", "Cal Newport", "Grand Central Publishing", "978-1455586691", "Non-Fiction", "Self-Help", 304, 1499),
    ("It's Your Ship", "Michael Abrashoff", "Grand Central Publishing", "978-1455523023", "Non-Fiction", "Self-Help", 240, 2166),
    ("The Virgin Way", "Richard Branson", "Portfolio", "978-1591847984", "Non-Fiction", "Business", 400, 2916),
    ("Sycamore Row", "John Grisham", "Bantam", "978-0553393613", "Fiction", "Thrillers", 642, 1503),
    ("The Count of Monte Cristo", "Alexandre Dumas", "Penguin Classics", "978-0140449266", "Fiction", "Classic", 1276, 1699),
    ("Sapiens", "Yuval Noah Harari", "Harper", "978-0062316097", "Non-Fiction", "Historical", 464, 1899),
    ("The Martian", "Andy Weir", "Crown", "978-0553418026", "Fiction", "Science Fiction", 384, 1249),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bookstore.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookstore Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bookstore.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bookstore Seed Data Loader");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {}", db_path))?;

    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = db.books().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} books", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Inserting books...");

    let mut inserted = 0;
    for book in BOOKS.iter().map(to_book) {
        match db.books().insert(&book).await {
            Ok(stored) => {
                inserted += 1;
                println!("  #{:<3} {}", stored.book_id, stored.title);
            }
            Err(e) => eprintln!("Failed to insert {}: {}", book.isbn, e),
        }
    }

    let categories = db.books().categories().await?;

    println!();
    println!("✓ Inserted {} books", inserted);
    println!("  Categories: {}", categories.join(", "));
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn to_book(seed: &SeedBook) -> Book {
    let (title, author, publisher, isbn, classification, category, page_count, price_cents) = *seed;

    Book {
        book_id: 0,
        title: title.to_string(),
        author: author.to_string(),
        publisher: publisher.to_string(),
        isbn: isbn.to_string(),
        classification: classification.to_string(),
        category: category.to_string(),
        page_count,
        price: Money::from_cents(price_cents),
    }
}
