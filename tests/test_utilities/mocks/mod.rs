/// Mock implementations for testing
mod mock_progress_reporter;
mod recording_property_store;

pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
pub use recording_property_store::{RecordingPropertyStore, StoreWrite};
