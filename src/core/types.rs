use crate::core::Category;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stored value of one inventory document. The key (item name) lives outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub quantity: u32,
    #[serde(
        default,
        deserialize_with = "crate::core::category::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
    pub added_at: DateTime<Utc>,
}

impl Document {
    pub fn new(quantity: u32, category: Category, added_at: DateTime<Utc>) -> Self {
        Self {
            quantity,
            category: Some(category),
            added_at,
        }
    }

    /// Same document with a different quantity; category and timestamp kept.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

/// One row of the in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub category: Option<Category>,
    pub added_at: DateTime<Utc>,
}

impl Item {
    pub fn from_document(name: String, document: Document) -> Self {
        Self {
            name,
            quantity: document.quantity,
            category: document.category,
            added_at: document.added_at,
        }
    }

    /// Name with its first character upper-cased. Storage keeps the raw key.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn added_at_iso(&self) -> String {
        self.added_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
