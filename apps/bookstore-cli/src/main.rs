//! # bookstore: Terminal Client
//!
//! Browses the catalog over HTTP and keeps the cart in a local file.
//!
//! ```text
//! bookstore books --page 2 --page-size 10 --category Classic
//! bookstore categories
//! bookstore cart add 3 -q 2
//! bookstore cart update 3 5
//! bookstore cart remove 3
//! bookstore cart show
//! ```
//!
//! Set `RUST_LOG=debug` to see requests and cart writes.

mod cli;
mod client;
mod file_store;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context};
use bookstore_core::cart::{CartLineItem, CartOp};
use bookstore_core::{CartSession, KeyValueStore, PageRequest};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{CartCommand, Cli, Commands};
use crate::client::CatalogClient;
use crate::file_store::FileStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Books {
            page,
            page_size,
            sort,
            category,
        } => {
            let request = PageRequest::new(page, page_size)
                .with_sort(sort.key())
                .with_category(category.as_deref());

            let result = client
                .books(&request)
                .await
                .with_context(|| format!("could not load books from {}", cli.api_url))?;

            print!("{}", render::book_page(&request, &result));
        }

        Commands::Categories => {
            let categories = client
                .categories()
                .await
                .with_context(|| format!("could not load categories from {}", cli.api_url))?;

            for category in categories {
                println!("{}", category);
            }
        }

        Commands::Cart { action } => {
            let path = cart_path(cli.cart_file)?;
            let mut session = CartSession::open(FileStore::new(&path))
                .with_context(|| format!("could not open cart at {}", path.display()))?;

            run_cart(&mut session, &client, action).await?;
        }
    }

    Ok(())
}

fn cart_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit.or_else(FileStore::default_path) {
        Some(path) => Ok(path),
        None => bail!("could not determine a data directory; pass --cart-file"),
    }
}

/// Applies one cart command and prints the resulting cart.
///
/// A failed write is reported after the cart is printed: the change still
/// applies to this run.
async fn run_cart<S: KeyValueStore>(
    session: &mut CartSession<S>,
    client: &CatalogClient,
    action: CartCommand,
) -> anyhow::Result<()> {
    let op = match action {
        CartCommand::Show => {
            print!("{}", render::cart(session.state()));
            return Ok(());
        }
        CartCommand::Add { book_id, quantity } => {
            if quantity < 1 {
                bail!("quantity must be at least 1");
            }
            let book = client.book(book_id).await.map_err(|e| {
                if e.is_not_found() {
                    anyhow::anyhow!("no book with id {}", book_id)
                } else {
                    anyhow::Error::new(e).context("could not look up the book")
                }
            })?;
            println!("Added {} of \"{}\"", quantity, book.title);
            CartOp::Add(CartLineItem::from_book(&book, quantity))
        }
        CartCommand::Update { book_id, quantity } => {
            if session.state().get(book_id).is_none() {
                println!("Book {} is not in the cart.", book_id);
            }
            CartOp::UpdateQuantity { book_id, quantity }
        }
        CartCommand::Remove { book_id } => CartOp::Remove { book_id },
        CartCommand::Clear => CartOp::Clear,
    };

    let saved = session.dispatch(op);

    print!("{}", render::cart(session.state()));

    saved.context("cart was updated but could not be saved")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::{Money, MemoryStore};

    fn session_with_two_lines() -> CartSession<MemoryStore> {
        let mut session = CartSession::open(MemoryStore::new()).unwrap();
        for (id, qty) in [(1, 2), (2, 1)] {
            session
                .dispatch(CartOp::Add(CartLineItem::new(id, format!("Book {}", id), Money::from_cents(500), qty)))
                .unwrap();
        }
        session
    }

    fn offline_client() -> CatalogClient {
        CatalogClient::new("http://127.0.0.1:9").unwrap()
    }

    #[tokio::test]
    async fn test_cart_commands_without_network() {
        let mut session = session_with_two_lines();
        let client = offline_client();

        run_cart(&mut session, &client, CartCommand::Update { book_id: 1, quantity: 7 })
            .await
            .unwrap();
        assert_eq!(session.state().get(1).unwrap().quantity, 7);

        run_cart(&mut session, &client, CartCommand::Update { book_id: 2, quantity: 0 })
            .await
            .unwrap();
        assert!(session.state().get(2).is_none());

        run_cart(&mut session, &client, CartCommand::Clear).await.unwrap();
        assert!(session.state().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_quantity() {
        let mut session = session_with_two_lines();

        let err = run_cart(&mut session, &offline_client(), CartCommand::Add { book_id: 1, quantity: 0 })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "quantity must be at least 1");
        assert_eq!(session.state().get(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_explicit_cart_path_wins() {
        let path = cart_path(Some(PathBuf::from("/tmp/my-cart.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/my-cart.json"));
    }
}
