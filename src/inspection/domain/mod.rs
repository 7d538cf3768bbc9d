pub mod component;
pub mod policy;
pub mod property;
pub mod repo_path;
pub mod repository;
pub mod status;

pub use component::{NameVersion, VulnerabilityAggregate};
pub use policy::{PolicySeverity, PolicyStatusReport, PolicySummaryStatus};
pub use property::BlackDuckProperty;
pub use repo_path::RepoPath;
pub use repository::{Repository, RepositoryList, RepositoryType};
pub use status::{InspectionStatus, ScanResult, UpdateStatus};
