//! Command-line definitions.

use std::path::PathBuf;

use bookstore_core::{SortKey, PAGE_SIZE_OPTIONS};
use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_API_URL: &str = "http://localhost:5071";

#[derive(Parser, Debug)]
#[command(name = "bookstore", version, about = "Browse the bookstore catalog and manage your cart")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKSTORE_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the catalog server"
    )]
    pub api_url: String,

    #[arg(
        long,
        global = true,
        env = "BOOKSTORE_CART_FILE",
        help = "Cart file (default: cart.json in the user data directory)"
    )]
    pub cart_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of the catalog
    Books {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = PAGE_SIZE_OPTIONS[0], value_parser = parse_page_size)]
        page_size: u32,

        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,

        #[arg(long)]
        category: Option<String>,
    },

    /// List the categories available for filtering
    Categories,

    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CartCommand {
    /// Print the cart and its totals
    Show,

    /// Add a book (merges with an existing line)
    Add {
        book_id: i64,

        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },

    /// Set a line's quantity (0 removes it)
    Update {
        book_id: i64,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove { book_id: i64 },

    /// Empty the cart
    Clear,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Alphabetical by title
    Title,
    /// Catalog order
    Natural,
}

impl SortArg {
    pub fn key(self) -> Option<SortKey> {
        match self {
            SortArg::Title => Some(SortKey::Title),
            SortArg::Natural => None,
        }
    }
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    let size: u32 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;

    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {:?}", PAGE_SIZE_OPTIONS))
    }
}
