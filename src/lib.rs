// ============================================================================
// Pantry Library
// ============================================================================

//! Pantry inventory tracker.
//!
//! Items live in a keyed document collection behind a [`PersistenceGateway`].
//! An [`Inventory`] keeps an in-memory snapshot of that collection, routes
//! every mutation through a read-modify-write on one document, and re-reads
//! the collection afterwards.
//!
//! # Examples
//!
//! ```
//! use pantry::{Category, InMemoryGateway, Inventory, SortMode};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut inventory = Inventory::load(Arc::new(InMemoryGateway::new())).await?;
//!
//! inventory.add_item("apples", 3, Some(Category::Fruits)).await?;
//! inventory.increment_one("apples").await?;
//!
//! let items = inventory.view("app", SortMode::Alphabetical);
//! assert_eq!(items[0].quantity, 4);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod inventory;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use crate::config::{AppConfig, StoreBackend};
pub use crate::core::{Category, Document, GatewayError, InventoryError, Item, Result};
pub use crate::inventory::{Inventory, SortMode, ViewState, filtered_and_sorted};
pub use crate::storage::{InMemoryGateway, JsonFileGateway, PersistenceGateway};
pub use crate::web::{AppState, build_router};
