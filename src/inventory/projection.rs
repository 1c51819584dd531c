//! Filtered and sorted read-only views over the snapshot.
//!
//! Projections never touch the gateway. Every sort is stable, so items that
//! compare equal keep the order the filter produced.

use crate::core::Item;
use crate::core::category::compare_by_rank;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortMode {
    QuantityAsc,
    QuantityDesc,
    Category,
    Alphabetical,
    LastAdded,
    FirstAdded,
    #[default]
    Unsorted,
}

impl SortMode {
    /// Modes offered to users, in menu order.
    pub const ALL: [SortMode; 6] = [
        SortMode::QuantityAsc,
        SortMode::QuantityDesc,
        SortMode::Category,
        SortMode::Alphabetical,
        SortMode::LastAdded,
        SortMode::FirstAdded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::QuantityAsc => "quantity-asc",
            SortMode::QuantityDesc => "quantity-desc",
            SortMode::Category => "category",
            SortMode::Alphabetical => "alphabetical",
            SortMode::LastAdded => "last-added",
            SortMode::FirstAdded => "first-added",
            SortMode::Unsorted => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::QuantityAsc => "Quantity (Ascending)",
            SortMode::QuantityDesc => "Quantity (Descending)",
            SortMode::Category => "Category",
            SortMode::Alphabetical => "Alphabetical",
            SortMode::LastAdded => "Last Added",
            SortMode::FirstAdded => "First Added",
            SortMode::Unsorted => "None",
        }
    }

    fn compare(&self, left: &Item, right: &Item) -> Ordering {
        match self {
            SortMode::QuantityAsc => left.quantity.cmp(&right.quantity),
            SortMode::QuantityDesc => right.quantity.cmp(&left.quantity),
            SortMode::Category => compare_by_rank(left.category.as_ref(), right.category.as_ref()),
            SortMode::Alphabetical => left.name.to_lowercase().cmp(&right.name.to_lowercase()),
            SortMode::LastAdded => right.added_at.cmp(&left.added_at),
            SortMode::FirstAdded => left.added_at.cmp(&right.added_at),
            SortMode::Unsorted => Ordering::Equal,
        }
    }
}

/// Unknown names fall back to [`SortMode::Unsorted`] instead of failing.
impl FromStr for SortMode {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim() {
            "quantity-asc" => SortMode::QuantityAsc,
            "quantity-desc" => SortMode::QuantityDesc,
            "category" => SortMode::Category,
            "alphabetical" => SortMode::Alphabetical,
            "last-added" => SortMode::LastAdded,
            "first-added" => SortMode::FirstAdded,
            _ => SortMode::Unsorted,
        })
    }
}

impl From<String> for SortMode {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<SortMode> for String {
    fn from(mode: SortMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Items whose name contains `search` (case-insensitively), ordered by `sort`.
pub fn filtered_and_sorted<'a>(snapshot: &'a [Item], search: &str, sort: SortMode) -> Vec<&'a Item> {
    let needle = search.to_lowercase();
    let mut items: Vec<&Item> = snapshot
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect();

    if sort != SortMode::Unsorted {
        items.sort_by(|left, right| sort.compare(left, right));
    }
    items
}
