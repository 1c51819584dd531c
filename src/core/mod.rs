pub mod category;
pub mod error;
pub mod types;

pub use category::Category;
pub use error::{GatewayError, GatewayResult, InventoryError, Result};
pub use types::{Document, Item};
