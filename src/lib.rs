//! artifactory-inspection - Black Duck inspection bookkeeping for Artifactory items
//!
//! This library records the state of Black Duck inspections as properties on
//! Artifactory repository items: inspection status and retry bookkeeping,
//! vulnerability and policy summaries, external ids, and the allow-lists of
//! repositories to inspect or scan.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Inspection core** (`inspection`): Domain values and property bookkeeping services
//! - **Ports** (`ports`): Interface definitions for property stores and progress reporting
//! - **Adapters** (`adapters`): Artifactory REST, JSON file and in-memory property stores
//! - **Config** (`config`): YAML configuration file and environment overrides
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use artifactory_inspection::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let store = ArtifactoryPropertyStore::new(
//!     "http://localhost:8081/artifactory",
//!     Some(ArtifactoryCredentials {
//!         username: "admin".to_string(),
//!         password: "password".to_string(),
//!     }),
//! )?;
//!
//! // Create services
//! let property_service = PropertyService::new(store, DateTimeManager::default());
//! let inspection = InspectionPropertyService::new(property_service, DEFAULT_MAX_RETRY_COUNT);
//!
//! // Record a failed inspection
//! let item = RepoPath::parse("pypi-remote-cache/requests/requests-2.31.0.tar.gz")?;
//! inspection.fail_inspection(&item, Some("network error"))?;
//! println!("retry again: {}", inspection.should_retry_inspection(&item)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::{
        ArtifactoryCredentials, ArtifactoryPropertyStore, InMemoryPropertyStore,
        JsonFilePropertyStore, StderrProgressReporter,
    };
    pub use crate::inspection::domain::{
        BlackDuckProperty, InspectionStatus, NameVersion, PolicySeverity, PolicyStatusReport,
        PolicySummaryStatus, RepoPath, Repository, RepositoryList, RepositoryType, ScanResult,
        UpdateStatus, VulnerabilityAggregate,
    };
    pub use crate::inspection::services::{
        DateTimeManager, InspectionPropertyService, InspectionVerifier, PropertyService,
        RepositoryAllowList, ScanPropertyService, TimeZoneSetting, Violation,
        DEFAULT_MAX_RETRY_COUNT,
    };
    pub use crate::ports::outbound::{
        ProgressReporter, PropertyFilter, PropertyFilters, PropertyStore, SilentProgressReporter,
    };
    pub use crate::shared::error::{ExitCode, PropertyError};
    pub use crate::shared::Result;
}
