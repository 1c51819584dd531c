use crate::core::Category;
use thiserror::Error;

/// Failures raised by a persistence gateway.
///
/// These are storage-level problems. The inventory never recovers from
/// them; they travel to the caller untouched.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid document key '{0}': {1}")]
    InvalidKey(String, String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(
        "\"{name}\" already exists in category \"{existing}\". Cannot add to category \"{requested}\"."
    )]
    CategoryConflict {
        name: String,
        existing: Category,
        requested: Category,
    },

    #[error("\"{0}\" does not exist in inventory.")]
    ItemNotFound(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl InventoryError {
    /// True for business-level rejections, false for storage failures.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::CategoryConflict { .. } | Self::ItemNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
