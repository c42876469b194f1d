//! stockroom CLI
//!
//! Command-line interface for the hosted inventory table: list, get,
//! search, insert, update and delete rows, plus bulk import of scraped
//! product exports. Results are printed as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use stockroom_api::{InventoryItem, ItemPatch, NewItem};
use stockroom_store::{DEFAULT_LIST_LIMIT, InventoryRepository, SupabaseInventory};

mod config;
mod import;

use config::Config;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Inventory CRUD against a hosted Supabase backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List inventory rows
    List {
        /// Maximum number of rows to return
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
    },
    /// Fetch a single item by id
    Get {
        /// Row id
        id: String,
    },
    /// Search name, description and type for a substring (case-insensitive)
    Search {
        /// Search term; `%`, `_` and `*` keep their wildcard meaning
        term: String,
    },
    /// Insert an item
    Insert {
        /// Item fields as a JSON object, e.g. '{"name":"Red Pot","type":"planter"}'
        #[arg(long)]
        data: String,
    },
    /// Apply a partial update to an item
    Update {
        /// Row id
        id: String,
        /// Changed fields as a JSON object
        #[arg(long)]
        data: String,
    },
    /// Delete an item by id
    Delete {
        /// Row id
        id: String,
    },
    /// Bulk-import a JSON export of product records
    Import {
        /// Path to a JSON array of partial rows
        #[arg(long)]
        file: PathBuf,
        /// Rows per insert request
        #[arg(long, default_value_t = import::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load_default()?;
    let store = SupabaseInventory::new(&config.supabase.url, config.supabase.anon_key)?;

    match cli.command {
        Commands::List { limit } => print_rows(&store.list(limit).await?)?,
        Commands::Get { id } => {
            let item = store.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Search { term } => print_rows(&store.search(&term).await?)?,
        Commands::Insert { data } => {
            let item: NewItem = serde_json::from_str(&data)?;
            print_rows(&store.insert(item).await?)?;
        }
        Commands::Update { id, data } => {
            let patch: ItemPatch = serde_json::from_str(&data)?;
            print_rows(&store.update(&id, patch).await?)?;
        }
        Commands::Delete { id } => print_rows(&store.delete(&id).await?)?,
        Commands::Import { file, chunk_size } => {
            let summary = import::run(&store, &file, chunk_size).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn print_rows(rows: &[InventoryItem]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
