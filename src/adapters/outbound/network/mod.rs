/// Network adapters for external API calls
mod artifactory_client;

pub use artifactory_client::{ArtifactoryCredentials, ArtifactoryPropertyStore};
