//! stockroom-store: inventory data access over a hosted PostgREST backend
//!
//! Exposes the [`InventoryRepository`] trait with two implementations: the
//! hosted backend ([`SupabaseInventory`]) and an in-memory store for tests
//! and offline use ([`MemoryInventory`]).
//!
//! # Example
//!
//! ```no_run
//! use stockroom_api::NewItem;
//! use stockroom_store::{DEFAULT_LIST_LIMIT, InventoryRepository, SupabaseInventory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SupabaseInventory::new("https://example.supabase.co", "anon-key")?;
//!
//! // List the first page
//! let items = store.list(DEFAULT_LIST_LIMIT).await?;
//!
//! // Search name, description and type
//! let pots = store.search("pot").await?;
//!
//! // Insert and fetch back
//! let created = store.insert(NewItem::named("Red Pot")).await?;
//! let item = store.get(&created[0].id).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod inventory;
pub mod memory;
pub mod supabase;

pub use error::{Operation, Result, StoreError};
pub use inventory::{DEFAULT_LIST_LIMIT, InventoryRepository, SupabaseInventory};
pub use memory::MemoryInventory;
pub use supabase::SupabaseClient;
