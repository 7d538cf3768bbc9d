use crate::adapters::outbound::memory::{InMemoryPropertyStore, PropertySnapshot};
use crate::inspection::domain::RepoPath;
use crate::ports::outbound::{PropertyFilters, PropertyStore};
use crate::shared::error::PropertyError;
use crate::shared::security::validate_store_file;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// JsonFilePropertyStore adapter backed by a local JSON document
///
/// The document maps item paths to their properties:
/// `{"npm-local/a.tgz": {"blackduck.forge": ["npmjs"]}}`.
/// The whole document is loaded on open and rewritten after every mutation,
/// through a temporary file in the same directory so readers never see a
/// partially written store. A mutation whose rewrite fails is undone in memory,
/// so the store keeps matching the file.
pub struct JsonFilePropertyStore {
    path: PathBuf,
    inner: InMemoryPropertyStore,
    write_lock: Mutex<()>,
}

impl JsonFilePropertyStore {
    /// Opens the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate_store_file(&path)?;

        let inner = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| PropertyError::StoreError {
                operation: format!("read {}", path.display()),
                details: e.to_string(),
            })?;
            if content.trim().is_empty() {
                InMemoryPropertyStore::new()
            } else {
                let snapshot: PropertySnapshot =
                    serde_json::from_str(&content).map_err(|e| PropertyError::StoreError {
                        operation: format!("parse {}", path.display()),
                        details: e.to_string(),
                    })?;
                InMemoryPropertyStore::from_snapshot(snapshot)?
            }
        } else {
            InMemoryPropertyStore::new()
        };

        tracing::debug!("Opened property store {} ({} items)", path.display(), inner.len());

        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to one property and rewrites the file, restoring the
    /// previous values when the rewrite fails
    fn mutate<F>(&self, repo_path: &RepoPath, name: &str, change: F) -> Result<()>
    where
        F: FnOnce(&InMemoryPropertyStore) -> Result<()>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Property store write lock poisoned"))?;

        let previous = self.inner.property_entry(repo_path, name);
        change(&self.inner)?;

        if let Err(err) = self.persist() {
            tracing::warn!(
                "Rolling back {} on {}: rewrite of {} failed",
                name,
                repo_path,
                self.path.display()
            );
            self.inner.restore_property(repo_path, name, previous)?;
            return Err(err);
        }

        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.inner.snapshot())?;
        let directory = match self.path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let write_error = |details: String| PropertyError::StoreError {
            operation: format!("write {}", self.path.display()),
            details,
        };

        let mut file = NamedTempFile::new_in(&directory).map_err(|e| write_error(e.to_string()))?;
        file.write_all(content.as_bytes())
            .map_err(|e| write_error(e.to_string()))?;
        file.persist(&self.path)
            .map_err(|e| write_error(e.error.to_string()))?;

        Ok(())
    }
}

impl PropertyStore for JsonFilePropertyStore {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        self.inner.has_property(repo_path, name)
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        self.inner.get_property_values(repo_path, name)
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        self.mutate(repo_path, name, |inner| {
            inner.set_property(repo_path, name, value)
        })
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        if !self.inner.has_property(repo_path, name)? {
            return Ok(());
        }
        self.mutate(repo_path, name, |inner| inner.delete_property(repo_path, name))
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        self.inner.items_by_properties(filters, repo_keys)
    }
}
