use super::date_time_manager::DateTimeManager;
use crate::inspection::domain::{BlackDuckProperty, NameVersion, RepoPath};
use crate::ports::outbound::{PropertyFilter, PropertyFilters, PropertyStore};
use crate::shared::error::PropertyError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::str::FromStr;

/// PropertyService - typed access to the Black Duck properties of repository items
///
/// Wraps a [`PropertyStore`] and speaks in terms of [`BlackDuckProperty`] instead of
/// raw keys. Values are trimmed on read and blank values are treated as absent.
///
/// # Type Parameters
/// * `S` - PropertyStore implementation
pub struct PropertyService<S: PropertyStore> {
    store: S,
    date_time_manager: DateTimeManager,
}

impl<S: PropertyStore> PropertyService<S> {
    /// Creates a new PropertyService with injected dependencies
    ///
    /// # Arguments
    /// * `store` - Store holding item properties
    /// * `date_time_manager` - Formatting rules for date-valued properties
    pub fn new(store: S, date_time_manager: DateTimeManager) -> Self {
        Self {
            store,
            date_time_manager,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn date_time_manager(&self) -> &DateTimeManager {
        &self.date_time_manager
    }

    /// True when the property holds a non-blank value, matching [`PropertyService::get_property`]
    pub fn has_property(&self, repo_path: &RepoPath, property: BlackDuckProperty) -> Result<bool> {
        Ok(self.get_property(repo_path, property)?.is_some())
    }

    pub fn get_property(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
    ) -> Result<Option<String>> {
        self.get_raw_property(repo_path, property.property_name())
    }

    /// Reads a property that must be present
    ///
    /// # Errors
    /// [`PropertyError::MissingProperty`] naming the key and the path
    pub fn get_required_property(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
    ) -> Result<String> {
        self.get_property(repo_path, property)?.ok_or_else(|| {
            PropertyError::MissingProperty {
                property: property.property_name().to_string(),
                repo_path: repo_path.to_path(),
            }
            .into()
        })
    }

    /// Reads an integer property
    ///
    /// A non-numeric value fails with the underlying `ParseIntError`.
    pub fn get_property_as_integer(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
    ) -> Result<Option<i64>> {
        match self.get_property(repo_path, property)? {
            Some(value) => Ok(Some(value.parse::<i64>()?)),
            None => Ok(None),
        }
    }

    /// Reads a property holding one of the enumerated status values
    ///
    /// # Errors
    /// [`PropertyError::InvalidPropertyValue`] when the stored value is not recognized
    pub fn get_property_as<T>(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
    ) -> Result<Option<T>>
    where
        T: FromStr<Err = String>,
    {
        match self.get_property(repo_path, property)? {
            Some(value) => T::from_str(&value).map(Some).map_err(|details| {
                PropertyError::InvalidPropertyValue {
                    property: property.property_name().to_string(),
                    repo_path: repo_path.to_path(),
                    value,
                    details,
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    pub fn get_date_from_property(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
    ) -> Result<Option<DateTime<Utc>>> {
        match self.get_property(repo_path, property)? {
            Some(value) => Ok(Some(self.date_time_manager.date_from_string(&value)?)),
            None => Ok(None),
        }
    }

    pub fn set_property(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
        value: &str,
    ) -> Result<()> {
        self.set_raw_property(repo_path, property.property_name(), value)
    }

    /// Writes a date in UTC, plus the localized companion when a time zone is configured
    pub fn set_property_from_date(
        &self,
        repo_path: &RepoPath,
        property: BlackDuckProperty,
        date: DateTime<Utc>,
    ) -> Result<()> {
        let value = self.date_time_manager.string_from_date(date);
        self.set_property(repo_path, property, &value)?;

        if let Some(converted) = self.date_time_manager.string_from_date_with_time_zone(date) {
            self.set_raw_property(repo_path, property.time_name(), &converted)?;
        }

        Ok(())
    }

    /// Deletes a property together with its companion time property
    ///
    /// Absent properties are skipped, so calling this repeatedly is harmless.
    pub fn delete_property(&self, repo_path: &RepoPath, property: BlackDuckProperty) -> Result<()> {
        self.delete_raw_property(repo_path, property.property_name())?;
        self.delete_raw_property(repo_path, property.time_name())
    }

    /// Deletes every Black Duck property of an item except the excluded keys
    ///
    /// # Arguments
    /// * `exclusions` - Primary property keys to keep
    pub fn delete_all_blackduck_properties_from_repo_path(
        &self,
        repo_path: &RepoPath,
        exclusions: &[String],
    ) -> Result<()> {
        for property in BlackDuckProperty::ALL {
            if exclusions
                .iter()
                .any(|excluded| excluded == property.property_name())
            {
                continue;
            }
            self.delete_property(repo_path, property)?;
        }

        Ok(())
    }

    /// Sweeps every item of a repository carrying any Black Duck property
    ///
    /// # Returns
    /// Number of items swept
    pub fn delete_all_blackduck_properties_from_repo(
        &self,
        repo_key: &str,
        exclusions: &[String],
    ) -> Result<usize> {
        let mut repo_paths = BTreeSet::new();
        for property in BlackDuckProperty::ALL {
            repo_paths.extend(self.get_items_containing_properties(repo_key, &[property])?);
        }

        for repo_path in &repo_paths {
            self.delete_all_blackduck_properties_from_repo_path(repo_path, exclusions)?;
        }

        tracing::debug!(
            repo_key,
            swept = repo_paths.len(),
            "Removed Black Duck properties from repository"
        );

        Ok(repo_paths.len())
    }

    /// Finds the items of a repository carrying all of the properties, whatever their values
    pub fn get_items_containing_properties(
        &self,
        repo_key: &str,
        properties: &[BlackDuckProperty],
    ) -> Result<Vec<RepoPath>> {
        let filters: PropertyFilters = properties
            .iter()
            .map(|property| (property.property_name().to_string(), PropertyFilter::Any))
            .collect();

        self.get_items_containing_properties_and_values(&filters, &[repo_key.to_string()])
    }

    pub fn get_items_containing_properties_and_values(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        self.store.items_by_properties(filters, repo_keys)
    }

    /// Black Duck project an item maps to, when both name and version are set
    pub fn get_project_name_version(&self, repo_path: &RepoPath) -> Result<Option<NameVersion>> {
        let project_name = self.get_property(repo_path, BlackDuckProperty::ProjectName)?;
        let project_version_name =
            self.get_property(repo_path, BlackDuckProperty::ProjectVersionName)?;

        Ok(match (project_name, project_version_name) {
            (Some(name), Some(version)) => Some(NameVersion::new(name, version)),
            _ => None,
        })
    }

    pub(crate) fn get_raw_property(&self, repo_path: &RepoPath, name: &str) -> Result<Option<String>> {
        Ok(self
            .store
            .get_property(repo_path, name)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    pub(crate) fn set_raw_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        self.store.set_property(repo_path, name, value)?;
        tracing::debug!("Set property {} to {} on {}", name, value, repo_path);
        Ok(())
    }

    fn delete_raw_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        if self.store.has_property(repo_path, name)? {
            self.store.delete_property(repo_path, name)?;
            tracing::debug!("Removed property {} from {}", name, repo_path);
        }
        Ok(())
    }
}
