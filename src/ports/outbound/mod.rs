/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the bookkeeping core uses
/// to reach external systems (the repository manager, the console).
pub mod progress_reporter;
pub mod property_store;

pub use progress_reporter::{ProgressReporter, SilentProgressReporter};
pub use property_store::{PropertyFilter, PropertyFilters, PropertyStore, WILDCARD};
