use artifactory_inspection::prelude::*;
use std::sync::{Arc, Mutex};

/// A write observed by [`RecordingPropertyStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Set {
        path: String,
        name: String,
        value: String,
    },
    Delete {
        path: String,
        name: String,
    },
}

/// PropertyStore for testing that records every write
///
/// Reads and searches are served by an in-memory store. Writes can be made to
/// fail to exercise error propagation.
#[derive(Default, Clone)]
pub struct RecordingPropertyStore {
    inner: Arc<InMemoryPropertyStore>,
    pub writes: Arc<Mutex<Vec<StoreWrite>>>,
    fail_writes: bool,
}

impl RecordingPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn get_writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Number of properties currently stored on an item
    pub fn property_count(&self, repo_path: &RepoPath) -> usize {
        self.inner
            .snapshot()
            .get(&repo_path.to_path())
            .map(|properties| properties.len())
            .unwrap_or(0)
    }

    fn check_writable(&self, operation: &str) -> Result<()> {
        if self.fail_writes {
            return Err(PropertyError::StoreError {
                operation: operation.to_string(),
                details: "Mock store rejects writes".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl PropertyStore for RecordingPropertyStore {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        self.inner.has_property(repo_path, name)
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        self.inner.get_property_values(repo_path, name)
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        self.check_writable("set")?;
        self.writes.lock().unwrap().push(StoreWrite::Set {
            path: repo_path.to_path(),
            name: name.to_string(),
            value: value.to_string(),
        });
        self.inner.set_property(repo_path, name, value)
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        self.check_writable("delete")?;
        self.writes.lock().unwrap().push(StoreWrite::Delete {
            path: repo_path.to_path(),
            name: name.to_string(),
        });
        self.inner.delete_property(repo_path, name)
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        self.inner.items_by_properties(filters, repo_keys)
    }
}
