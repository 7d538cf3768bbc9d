/// Filesystem adapters for file I/O operations
mod json_property_store;

pub use json_property_store::JsonFilePropertyStore;
