use crate::inspection::domain::RepoPath;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fmt;

/// Wildcard value matching any value of a property in a property search
pub const WILDCARD: &str = "*";

/// Value constraint of a single property in a property search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyFilter {
    /// The property must be present, whatever its value
    Any,
    /// The property must carry exactly this value
    Exact(String),
}

impl PropertyFilter {
    pub fn exact(value: impl Into<String>) -> Self {
        PropertyFilter::Exact(value.into())
    }

    pub fn matches(&self, values: &[String]) -> bool {
        match self {
            PropertyFilter::Any => !values.is_empty(),
            PropertyFilter::Exact(expected) => values.iter().any(|v| v == expected),
        }
    }

    /// Value as sent to the store (`*` for [`PropertyFilter::Any`])
    pub fn as_query_value(&self) -> &str {
        match self {
            PropertyFilter::Any => WILDCARD,
            PropertyFilter::Exact(value) => value,
        }
    }
}

impl From<&str> for PropertyFilter {
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            PropertyFilter::Any
        } else {
            PropertyFilter::Exact(value.to_string())
        }
    }
}

impl fmt::Display for PropertyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

/// Property name to value constraint; every entry must match
pub type PropertyFilters = BTreeMap<String, PropertyFilter>;

/// PropertyStore port for the repository manager's item metadata
///
/// This port abstracts the key/value property API of the external repository
/// manager. Implementations perform no validation or interpretation of values;
/// typed access lives in `PropertyService`.
///
/// Individual calls are expected to be atomic. Nothing here offers
/// compare-and-swap, so read-modify-write sequences built on top of this
/// trait can lose updates under concurrent writers.
pub trait PropertyStore {
    /// Returns true if the item carries the property
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool>;

    /// Returns the first value of the property, if present
    fn get_property(&self, repo_path: &RepoPath, name: &str) -> Result<Option<String>> {
        Ok(self
            .get_property_values(repo_path, name)?
            .into_iter()
            .next())
    }

    /// Returns every value of a possibly multi-valued property
    ///
    /// An absent property yields an empty vector.
    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>>;

    /// Sets the property to a single value, replacing previous values
    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()>;

    /// Removes the property; removing an absent property is a no-op
    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()>;

    /// Finds items in the given repositories matching every filter
    ///
    /// # Arguments
    /// * `filters` - Property name to value constraint
    /// * `repo_keys` - Repositories to search; an empty slice searches all of them
    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>>;
}

impl<T: PropertyStore + ?Sized> PropertyStore for &T {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        (**self).has_property(repo_path, name)
    }

    fn get_property(&self, repo_path: &RepoPath, name: &str) -> Result<Option<String>> {
        (**self).get_property(repo_path, name)
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        (**self).get_property_values(repo_path, name)
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        (**self).set_property(repo_path, name, value)
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        (**self).delete_property(repo_path, name)
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        (**self).items_by_properties(filters, repo_keys)
    }
}

impl<T: PropertyStore + ?Sized> PropertyStore for Box<T> {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        (**self).has_property(repo_path, name)
    }

    fn get_property(&self, repo_path: &RepoPath, name: &str) -> Result<Option<String>> {
        (**self).get_property(repo_path, name)
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        (**self).get_property_values(repo_path, name)
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        (**self).set_property(repo_path, name, value)
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        (**self).delete_property(repo_path, name)
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        (**self).items_by_properties(filters, repo_keys)
    }
}
