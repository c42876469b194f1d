//! stockroom-api: Shared data types
//!
//! Contains the inventory row projection and the insert/update request
//! types used across the store and the CLI.

pub mod item;

pub use item::{InventoryItem, ItemPatch, NewItem};
