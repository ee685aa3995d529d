//! textdeck: convert a plain-text document into Anki flashcards.
//!
//! Reads the input file, builds the document model once, runs the three quiz
//! generators in deck order, prints the items, and uploads them through
//! AnkiConnect unless short-circuited.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textdeck_core::{generate_all, Document, DEFAULT_SHUFFLE_SEED};

mod anki;
mod output;

#[derive(Parser, Debug)]
#[command(name = "textdeck")]
#[command(about = "Convert a plain-text document into Anki flashcards")]
#[command(version)]
struct Args {
    /// Deck to create and upload into
    deckname: String,

    /// Plain-text source document
    inputfile: PathBuf,

    /// Only build and print quiz items; do not upload to Anki
    #[arg(short = 's', long)]
    shortcircuit: bool,

    /// AnkiConnect endpoint
    #[arg(long, default_value = anki::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Shuffle seed for outline items (changes ordering only)
    #[arg(long, default_value_t = DEFAULT_SHUFFLE_SEED)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let text = tokio::fs::read_to_string(&args.inputfile)
        .await
        .with_context(|| format!("reading {}", args.inputfile.display()))?;

    let document = Document::from_text(&text);
    let items = generate_all(&document, args.seed)?;
    info!(count = items.len(), "generated quiz items");

    print!("{}", output::format_items(&items));

    if args.shortcircuit {
        return Ok(());
    }

    let client = anki::AnkiClient::new(&args.endpoint);

    client.create_deck(&args.deckname).await?;
    info!(deck = %args.deckname, "deck created");

    for item in &items {
        client.add_note(&args.deckname, item).await?;
    }
    info!(count = items.len(), "notes uploaded");

    let names = client.deck_names().await?;
    println!("decks: {}", names.join(", "));

    Ok(())
}
