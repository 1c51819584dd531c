pub mod engine;
pub mod memory;
pub mod persistence;

pub use engine::{PersistenceGateway, validate_key};
pub use memory::InMemoryGateway;
pub use persistence::JsonFileGateway;
