use crate::inspection::domain::RepoPath;
use crate::ports::outbound::{PropertyFilters, PropertyStore};
use crate::shared::error::PropertyError;
use crate::shared::Result;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Item path (`<repo>/<path>`) to property name to values
pub type PropertySnapshot = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// InMemoryPropertyStore adapter keeping item properties in a concurrent map
///
/// Each call is atomic with respect to a single item, which is the only
/// guarantee the PropertyStore port asks for.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    items: DashMap<RepoPath, BTreeMap<String, Vec<String>>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Rebuilds a store from a snapshot, validating every item path
    pub fn from_snapshot(snapshot: PropertySnapshot) -> Result<Self> {
        let store = Self::new();
        for (path, properties) in snapshot {
            let repo_path = RepoPath::parse(&path)?;
            let properties: BTreeMap<String, Vec<String>> = properties
                .into_iter()
                .filter(|(_, values)| !values.is_empty())
                .collect();
            if !properties.is_empty() {
                store.items.insert(repo_path, properties);
            }
        }
        Ok(store)
    }

    /// Copy of every stored property, keyed by item path
    pub fn snapshot(&self) -> PropertySnapshot {
        self.items
            .iter()
            .map(|entry| (entry.key().to_path(), entry.value().clone()))
            .collect()
    }

    /// Number of items carrying at least one property
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current values of a property, `None` when it is not set
    pub(crate) fn property_entry(&self, repo_path: &RepoPath, name: &str) -> Option<Vec<String>> {
        self.items
            .get(repo_path)
            .and_then(|properties| properties.get(name).cloned())
    }

    /// Puts back values captured with [`InMemoryPropertyStore::property_entry`]
    pub(crate) fn restore_property(
        &self,
        repo_path: &RepoPath,
        name: &str,
        previous: Option<Vec<String>>,
    ) -> Result<()> {
        match previous {
            Some(values) => {
                self.items
                    .entry(repo_path.clone())
                    .or_default()
                    .insert(name.to_string(), values);
                Ok(())
            }
            None => self.delete_property(repo_path, name),
        }
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        Ok(self
            .items
            .get(repo_path)
            .is_some_and(|properties| properties.contains_key(name)))
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        Ok(self
            .items
            .get(repo_path)
            .and_then(|properties| properties.get(name).cloned())
            .unwrap_or_default())
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        self.items
            .entry(repo_path.clone())
            .or_default()
            .insert(name.to_string(), vec![value.to_string()]);
        Ok(())
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        let now_empty = match self.items.get_mut(repo_path) {
            Some(mut properties) => {
                properties.remove(name);
                properties.is_empty()
            }
            None => false,
        };

        if now_empty {
            self.items
                .remove_if(repo_path, |_, properties| properties.is_empty());
        }
        Ok(())
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        if filters.is_empty() {
            return Err(PropertyError::Validation {
                message: "A property search needs at least one property".to_string(),
            }
            .into());
        }

        let mut found: Vec<RepoPath> = self
            .items
            .iter()
            .filter(|entry| {
                repo_keys.is_empty()
                    || repo_keys
                        .iter()
                        .any(|key| key.as_str() == entry.key().repo_key())
            })
            .filter(|entry| {
                filters.iter().all(|(name, filter)| {
                    entry
                        .value()
                        .get(name)
                        .is_some_and(|values| filter.matches(values))
                })
            })
            .map(|entry| entry.key().clone())
            .collect();

        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::PropertyFilter;

    fn path(repo_key: &str, item: &str) -> RepoPath {
        RepoPath::new(repo_key, item).unwrap()
    }

    #[test]
    fn test_set_replaces_previous_values() {
        let store = InMemoryPropertyStore::new();
        let item = path("npm-local", "a.tgz");
        store.set_property(&item, "blackduck.forge", "npmjs").unwrap();
        store.set_property(&item, "blackduck.forge", "maven").unwrap();

        assert_eq!(
            store.get_property_values(&item, "blackduck.forge").unwrap(),
            vec!["maven".to_string()]
        );
    }

    #[test]
    fn test_delete_absent_property_is_noop() {
        let store = InMemoryPropertyStore::new();
        let item = path("npm-local", "a.tgz");

        store.delete_property(&item, "blackduck.forge").unwrap();
        assert!(!store.has_property(&item, "blackduck.forge").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_last_property_drops_item() {
        let store = InMemoryPropertyStore::new();
        let item = path("npm-local", "a.tgz");
        store.set_property(&item, "blackduck.forge", "npmjs").unwrap();

        store.delete_property(&item, "blackduck.forge").unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_items_by_properties_wildcard_and_exact() {
        let store = InMemoryPropertyStore::new();
        let pending = path("npm-local", "a.tgz");
        let failed = path("npm-local", "b.tgz");
        let elsewhere = path("pypi-local", "c.whl");
        store
            .set_property(&pending, "blackduck.inspectionStatus", "PENDING")
            .unwrap();
        store
            .set_property(&failed, "blackduck.inspectionStatus", "FAILURE")
            .unwrap();
        store
            .set_property(&elsewhere, "blackduck.inspectionStatus", "PENDING")
            .unwrap();

        let mut any = PropertyFilters::new();
        any.insert("blackduck.inspectionStatus".to_string(), PropertyFilter::Any);
        assert_eq!(
            store
                .items_by_properties(&any, &["npm-local".to_string()])
                .unwrap(),
            vec![pending.clone(), failed]
        );

        assert!(store
            .items_by_properties(&PropertyFilters::new(), &[])
            .is_err());

        let mut exact = PropertyFilters::new();
        exact.insert(
            "blackduck.inspectionStatus".to_string(),
            PropertyFilter::exact("PENDING"),
        );
        assert_eq!(
            store.items_by_properties(&exact, &[]).unwrap(),
            vec![pending, elsewhere]
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = InMemoryPropertyStore::new();
        store
            .set_property(&path("npm-local", "a/b.tgz"), "blackduck.forge", "npmjs")
            .unwrap();
        store
            .set_property(&RepoPath::repository_root("npm-local").unwrap(), "k", "v")
            .unwrap();

        let snapshot = store.snapshot();
        assert!(snapshot.contains_key("npm-local/a/b.tgz"));
        assert!(snapshot.contains_key("npm-local"));

        let restored = InMemoryPropertyStore::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.len(), 2);
        assert!(restored
            .has_property(&path("npm-local", "a/b.tgz"), "blackduck.forge")
            .unwrap());
    }

    #[test]
    fn test_from_snapshot_rejects_invalid_path() {
        let mut snapshot = PropertySnapshot::new();
        snapshot.insert("bad key/x".to_string(), BTreeMap::new());
        assert!(InMemoryPropertyStore::from_snapshot(snapshot).is_err());
    }
}
