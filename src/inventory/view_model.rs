//! Inventory view-model.
//!
//! `Inventory` owns the in-memory snapshot of the collection and mediates
//! every mutation. A mutation reads one document, decides what to write,
//! writes it, then re-fetches the whole collection.
//!
//! The read-decide-write step is an optimistic update with no retry and no
//! version check. Two clients mutating the same key concurrently race, and
//! the last write reaching the store wins.

use crate::core::{Category, Document, InventoryError, Item, Result};
use crate::inventory::projection::{SortMode, filtered_and_sorted};
use crate::storage::PersistenceGateway;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether the last mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Clean,
    Errored { message: String },
}

impl ViewState {
    pub fn is_errored(&self) -> bool {
        matches!(self, ViewState::Errored { .. })
    }
}

/// Outcome of the decision step of a read-modify-write.
#[derive(Debug)]
enum Write {
    Upsert(Document),
    Remove,
    Nothing,
}

pub struct Inventory {
    gateway: Arc<dyn PersistenceGateway>,
    snapshot: Vec<Item>,
    state: ViewState,
}

impl Inventory {
    /// Empty view over `gateway`. Call [`Inventory::refresh`] to populate it.
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            gateway,
            snapshot: Vec::new(),
            state: ViewState::Clean,
        }
    }

    /// Build a view and fetch the collection once.
    pub async fn load(gateway: Arc<dyn PersistenceGateway>) -> Result<Self> {
        let mut inventory = Self::new(gateway);
        inventory.refresh().await?;
        Ok(inventory)
    }

    pub fn snapshot(&self) -> &[Item] {
        &self.snapshot
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Clean => None,
            ViewState::Errored { message } => Some(message),
        }
    }

    pub fn clear_error(&mut self) {
        self.state = ViewState::Clean;
    }

    /// Projection of the current snapshot.
    pub fn view(&self, search: &str, sort: SortMode) -> Vec<&Item> {
        filtered_and_sorted(&self.snapshot, search, sort)
    }

    /// Replace the snapshot with the gateway's current contents.
    pub async fn refresh(&mut self) -> Result<()> {
        let documents = self.gateway.list_all().await?;
        self.snapshot = documents
            .into_iter()
            .map(|(name, document)| Item::from_document(name, document))
            .collect();
        debug!(items = self.snapshot.len(), "snapshot refreshed");
        Ok(())
    }

    /// Add `quantity` units of `name`.
    ///
    /// A new item takes `category` (or `Undefined`) and the current time. An
    /// existing item keeps its category and timestamp; asking for a different
    /// category than the stored one is rejected without writing.
    pub async fn add_item(
        &mut self,
        name: &str,
        quantity: u32,
        category: Option<Category>,
    ) -> Result<()> {
        let quantity = quantity.max(1);
        self.read_modify_write(name, |current| match current {
            None => Ok(Write::Upsert(Document::new(
                quantity,
                category.unwrap_or(Category::Undefined),
                Utc::now(),
            ))),
            Some(stored) => {
                if let (Some(existing), Some(requested)) = (&stored.category, &category)
                    && existing != requested
                {
                    return Err(InventoryError::CategoryConflict {
                        name: name.to_string(),
                        existing: existing.clone(),
                        requested: requested.clone(),
                    });
                }
                Ok(Write::Upsert(Document {
                    quantity: add_units(name, stored.quantity, quantity),
                    category: stored.category.or(category),
                    added_at: stored.added_at,
                }))
            }
        })
        .await?;
        info!(item = name, quantity, "item added");
        Ok(())
    }

    /// Add one unit, creating an `Uncategorized` item when absent.
    pub async fn increment_one(&mut self, name: &str) -> Result<()> {
        self.read_modify_write(name, |current| {
            Ok(Write::Upsert(match current {
                Some(stored) => stored.with_quantity(add_units(name, stored.quantity, 1)),
                None => Document::new(1, Category::Uncategorized, Utc::now()),
            }))
        })
        .await
    }

    /// Remove one unit; the last unit removes the document.
    pub async fn decrement_one(&mut self, name: &str) -> Result<()> {
        self.read_modify_write(name, |current| {
            Ok(match current {
                None => Write::Nothing,
                Some(stored) if stored.quantity <= 1 => Write::Remove,
                Some(stored) => Write::Upsert(stored.with_quantity(stored.quantity - 1)),
            })
        })
        .await
    }

    /// Remove up to `amount` units of an existing item.
    ///
    /// Removing at least the stored quantity deletes the document. An absent
    /// item is rejected and the snapshot is left as it was.
    pub async fn delete_quantity(&mut self, name: &str, amount: u32) -> Result<()> {
        let amount = amount.max(1);
        self.read_modify_write(name, |current| match current {
            None => Err(InventoryError::ItemNotFound(name.to_string())),
            Some(stored) if stored.quantity <= amount => Ok(Write::Remove),
            Some(stored) => Ok(Write::Upsert(stored.with_quantity(stored.quantity - amount))),
        })
        .await?;
        info!(item = name, amount, "quantity deleted");
        Ok(())
    }

    /// Read `name`, let `decide` pick a write, apply it, then refresh.
    ///
    /// A rejection from `decide` puts the view into the errored state and
    /// returns before anything is written. Gateway failures propagate as-is
    /// and leave the view state alone.
    async fn read_modify_write<F>(&mut self, name: &str, decide: F) -> Result<()>
    where
        F: FnOnce(Option<Document>) -> Result<Write>,
    {
        let current = self.gateway.get(name).await?;

        let write = match decide(current) {
            Ok(write) => write,
            Err(err) if err.is_rejection() => {
                warn!(item = name, error = %err, "mutation rejected");
                self.state = ViewState::Errored {
                    message: err.to_string(),
                };
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        debug!(item = name, write = ?write, "applying write");
        match write {
            Write::Upsert(document) => self.gateway.upsert(name, document).await?,
            Write::Remove => self.gateway.remove(name).await?,
            Write::Nothing => {}
        }

        self.refresh().await?;
        self.state = ViewState::Clean;
        Ok(())
    }
}

/// Stored quantity plus `units`, clamped at `u32::MAX`.
fn add_units(name: &str, stored: u32, units: u32) -> u32 {
    stored.checked_add(units).unwrap_or_else(|| {
        warn!(item = name, stored, units, "quantity clamped at maximum");
        u32::MAX
    })
}
