pub mod projection;
pub mod view_model;

pub use projection::{SortMode, filtered_and_sorted};
pub use view_model::{Inventory, ViewState};
