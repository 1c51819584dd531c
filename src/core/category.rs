//! Item categories.
//!
//! Six categories are selectable when adding an item. `Uncategorized` is the
//! sentinel written by the single-increment path, and anything else read back
//! from the store is kept verbatim as `Other`.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Fruits,
    Vegetables,
    DairyAndEggs,
    MeatAndPoultry,
    FishAndSeafood,
    Undefined,
    Uncategorized,
    Other(String),
}

impl Category {
    /// Selectable categories, in display and sort order.
    pub const LISTED: [Category; 6] = [
        Category::Fruits,
        Category::Vegetables,
        Category::DairyAndEggs,
        Category::MeatAndPoultry,
        Category::FishAndSeafood,
        Category::Undefined,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::DairyAndEggs => "Dairy and Eggs",
            Category::MeatAndPoultry => "Meat and Poultry",
            Category::FishAndSeafood => "Fish and Seafood",
            Category::Undefined => "Undefined",
            Category::Uncategorized => "Uncategorized",
            Category::Other(name) => name,
        }
    }

    /// Parse a stored or user-supplied category name.
    ///
    /// Matching is exact and case-sensitive. Blank input means "no category".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self::from(raw.to_string()))
    }

    /// Parse a category chosen when adding an item.
    ///
    /// Only [`Category::LISTED`] names are accepted; blank input means "no
    /// category". `Uncategorized` and unknown names are refused.
    pub fn parse_listed(raw: &str) -> std::result::Result<Option<Self>, String> {
        let Some(category) = Self::parse(raw.trim()) else {
            return Ok(None);
        };
        if category.rank().is_some() {
            return Ok(Some(category));
        }
        let expected: Vec<&str> = Self::LISTED.iter().map(Category::as_str).collect();
        Err(format!(
            "unknown category \"{}\", expected one of: {}",
            raw.trim(),
            expected.join(", ")
        ))
    }

    /// Position in [`Category::LISTED`], `None` for unlisted categories.
    pub fn rank(&self) -> Option<usize> {
        Self::LISTED.iter().position(|listed| listed == self)
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Fruits" => Category::Fruits,
            "Vegetables" => Category::Vegetables,
            "Dairy and Eggs" => Category::DairyAndEggs,
            "Meat and Poultry" => Category::MeatAndPoultry,
            "Fish and Seafood" => Category::FishAndSeafood,
            "Undefined" => Category::Undefined,
            "Uncategorized" => Category::Uncategorized,
            _ => Category::Other(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders optional categories by listed rank; unlisted and missing sort last.
pub fn compare_by_rank(left: Option<&Category>, right: Option<&Category>) -> Ordering {
    let rank = |category: Option<&Category>| category.and_then(Category::rank).unwrap_or(usize::MAX);
    rank(left).cmp(&rank(right))
}

/// Serde helper: an absent, null or blank category decodes as `None`.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> std::result::Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Category::parse))
}
