/// In-process property store
mod in_memory_store;

pub use in_memory_store::{InMemoryPropertyStore, PropertySnapshot};
