use crate::inspection::domain::{RepoPath, Repository, RepositoryList};
use crate::ports::outbound::PropertyStore;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Maintains the comma separated repository lists the plugin watches
///
/// Each list is a single property on a configuration item. The list has set
/// semantics: a key appears at most once and order carries no meaning.
/// Updates are read-modify-write and can lose changes under concurrent writers.
pub struct RepositoryAllowList<S: PropertyStore> {
    store: S,
}

impl<S: PropertyStore> RepositoryAllowList<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current members of a list; an absent or blank property is an empty set
    pub fn repositories(&self, path: &RepoPath, list: RepositoryList) -> Result<BTreeSet<String>> {
        let entry = self.store.get_property(path, list.key())?;
        Ok(entry.as_deref().map(split_list).unwrap_or_default())
    }

    /// Adds or removes the inspectable key of `repository` and writes the list back
    ///
    /// # Returns
    /// The resulting set of keys
    pub fn modify_list(
        &self,
        path: &RepoPath,
        list: RepositoryList,
        repository: &Repository,
        add: bool,
    ) -> Result<BTreeSet<String>> {
        let mut repositories = self.repositories(path, list)?;
        let key = repository.inspectable_key();

        if add {
            repositories.insert(key);
        } else {
            repositories.remove(&key);
        }

        let joined = repositories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.store.set_property(path, list.key(), &joined)?;
        tracing::debug!("Set {} to '{}' on {}", list.key(), joined, path);

        Ok(repositories)
    }

    pub fn add_repository_to_inspection(
        &self,
        path: &RepoPath,
        repository: &Repository,
    ) -> Result<BTreeSet<String>> {
        self.modify_list(path, RepositoryList::Inspection, repository, true)
    }

    pub fn remove_repository_from_inspection(
        &self,
        path: &RepoPath,
        repository: &Repository,
    ) -> Result<BTreeSet<String>> {
        self.modify_list(path, RepositoryList::Inspection, repository, false)
    }

    pub fn add_repository_to_scanner(
        &self,
        path: &RepoPath,
        repository: &Repository,
    ) -> Result<BTreeSet<String>> {
        self.modify_list(path, RepositoryList::Scan, repository, true)
    }

    pub fn remove_repository_from_scanner(
        &self,
        path: &RepoPath,
        repository: &Repository,
    ) -> Result<BTreeSet<String>> {
        self.modify_list(path, RepositoryList::Scan, repository, false)
    }
}

fn split_list(entry: &str) -> BTreeSet<String> {
    entry
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::InMemoryPropertyStore;
    use crate::inspection::domain::RepositoryType;

    fn config_path() -> RepoPath {
        RepoPath::new("plugin-config", "blackDuckPlugin.properties").unwrap()
    }

    #[test]
    fn test_split_list_trims_and_drops_empty_entries() {
        let keys = split_list(" npm-local , ,pypi-remote-cache,");
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec!["npm-local".to_string(), "pypi-remote-cache".to_string()]
        );
    }

    #[test]
    fn test_add_remote_repository_uses_cache_key() {
        let allow_list = RepositoryAllowList::new(InMemoryPropertyStore::new());
        let repository = Repository::new("pypi-remote", RepositoryType::Remote);

        let keys = allow_list
            .add_repository_to_inspection(&config_path(), &repository)
            .unwrap();

        assert!(keys.contains("pypi-remote-cache"));
        assert_eq!(
            allow_list
                .store
                .get_property(&config_path(), RepositoryList::Inspection.key())
                .unwrap()
                .as_deref(),
            Some("pypi-remote-cache")
        );
    }

    #[test]
    fn test_lists_are_independent() {
        let allow_list = RepositoryAllowList::new(InMemoryPropertyStore::new());
        let repository = Repository::new("generic-local", RepositoryType::Local);

        allow_list
            .add_repository_to_scanner(&config_path(), &repository)
            .unwrap();

        assert!(allow_list
            .repositories(&config_path(), RepositoryList::Inspection)
            .unwrap()
            .is_empty());
        assert_eq!(
            allow_list
                .repositories(&config_path(), RepositoryList::Scan)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_remove_last_repository_writes_empty_list() {
        let allow_list = RepositoryAllowList::new(InMemoryPropertyStore::new());
        let repository = Repository::new("npm-local", RepositoryType::Local);
        allow_list
            .add_repository_to_scanner(&config_path(), &repository)
            .unwrap();

        let keys = allow_list
            .remove_repository_from_scanner(&config_path(), &repository)
            .unwrap();

        assert!(keys.is_empty());
        assert!(allow_list
            .repositories(&config_path(), RepositoryList::Scan)
            .unwrap()
            .is_empty());
    }
}
