/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod filesystem;
pub mod memory;
pub mod network;

pub use console::StderrProgressReporter;
pub use filesystem::JsonFilePropertyStore;
pub use memory::{InMemoryPropertyStore, PropertySnapshot};
pub use network::{ArtifactoryCredentials, ArtifactoryPropertyStore};
