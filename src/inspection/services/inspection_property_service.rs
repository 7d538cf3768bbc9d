use super::property_service::PropertyService;
use crate::inspection::domain::{
    BlackDuckProperty, InspectionStatus, NameVersion, PolicyStatusReport, RepoPath, UpdateStatus,
    VulnerabilityAggregate,
};
use crate::ports::outbound::{PropertyFilter, PropertyFilters, PropertyStore};
use crate::shared::Result;
use chrono::{DateTime, Utc};

/// Default upper bound of recorded inspection failures per item
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 5;

const UNKNOWN_HOST: &str = "UNKNOWN_HOST";

/// InspectionPropertyService - inspection state machine stored in item properties
///
/// The inspection state of an item is nothing more than its properties:
/// no `blackduck.inspectionStatus` means the item was never inspected, otherwise
/// the status is one of PENDING, SUCCESS or FAILURE. Failures carry a retry
/// count which never exceeds `max_retry_count`.
///
/// # Type Parameters
/// * `S` - PropertyStore implementation
pub struct InspectionPropertyService<S: PropertyStore> {
    property_service: PropertyService<S>,
    max_retry_count: u32,
}

impl<S: PropertyStore> InspectionPropertyService<S> {
    pub fn new(property_service: PropertyService<S>, max_retry_count: u32) -> Self {
        Self {
            property_service,
            max_retry_count,
        }
    }

    pub fn property_service(&self) -> &PropertyService<S> {
        &self.property_service
    }

    pub fn max_retry_count(&self) -> u32 {
        self.max_retry_count
    }

    pub fn has_external_id_properties(&self, repo_path: &RepoPath) -> Result<bool> {
        Ok(self
            .property_service
            .has_property(repo_path, BlackDuckProperty::OriginId)?
            && self
                .property_service
                .has_property(repo_path, BlackDuckProperty::Forge)?)
    }

    pub fn set_external_id_properties(
        &self,
        repo_path: &RepoPath,
        forge: &str,
        origin_id: &str,
        component: &NameVersion,
    ) -> Result<()> {
        let props = &self.property_service;
        props.set_property(repo_path, BlackDuckProperty::OriginId, origin_id)?;
        props.set_property(repo_path, BlackDuckProperty::Forge, forge)?;
        props.set_property(
            repo_path,
            BlackDuckProperty::ComponentNameVersion,
            &component.to_string(),
        )
    }

    /// Returns true when another inspection attempt should be made
    ///
    /// Items without a status are always retried. FAILURE items are retried while
    /// their retry count stays below the maximum. PENDING and SUCCESS are not.
    pub fn should_retry_inspection(&self, repo_path: &RepoPath) -> Result<bool> {
        if !self.has_inspection_status(repo_path)? {
            return Ok(true);
        }

        Ok(
            self.assert_inspection_status(repo_path, InspectionStatus::Failure)?
                && self.failed_inspection_count(repo_path)? < i64::from(self.max_retry_count),
        )
    }

    pub fn set_vulnerability_properties(
        &self,
        repo_path: &RepoPath,
        vulnerabilities: &VulnerabilityAggregate,
    ) -> Result<()> {
        let props = &self.property_service;
        props.set_property(
            repo_path,
            BlackDuckProperty::HighVulnerabilities,
            &vulnerabilities.high.to_string(),
        )?;
        props.set_property(
            repo_path,
            BlackDuckProperty::MediumVulnerabilities,
            &vulnerabilities.medium.to_string(),
        )?;
        props.set_property(
            repo_path,
            BlackDuckProperty::LowVulnerabilities,
            &vulnerabilities.low.to_string(),
        )
    }

    /// Writes the policy status; the severity list is removed when empty
    pub fn set_policy_properties(
        &self,
        repo_path: &RepoPath,
        report: &PolicyStatusReport,
    ) -> Result<()> {
        match report.joined_severity_types() {
            Some(severity_types) => self.property_service.set_property(
                repo_path,
                BlackDuckProperty::PolicySeverityTypes,
                &severity_types,
            )?,
            None => self
                .property_service
                .delete_property(repo_path, BlackDuckProperty::PolicySeverityTypes)?,
        }

        self.property_service.set_property(
            repo_path,
            BlackDuckProperty::PolicyStatus,
            report.status().as_str(),
        )
    }

    pub fn set_component_version_url(&self, repo_path: &RepoPath, url: &str) -> Result<()> {
        self.property_service
            .set_property(repo_path, BlackDuckProperty::ComponentVersionUrl, url)
    }

    /// Records one more failed inspection
    ///
    /// Once the retry count has reached the maximum the failure is only logged
    /// and the stored state is left untouched.
    pub fn fail_inspection(&self, repo_path: &RepoPath, message: Option<&str>) -> Result<()> {
        let retry_count = self.failed_inspection_count(repo_path)? + 1;
        tracing::debug!(
            "Attempting to fail inspection for '{}' with message '{}'",
            repo_path,
            message.unwrap_or_default()
        );

        if retry_count > i64::from(self.max_retry_count) {
            tracing::debug!(
                "Attempting to fail inspection more than the number of maximum attempts: {}",
                repo_path
            );
            return Ok(());
        }

        let retry_count = u32::try_from(retry_count)?;
        self.set_inspection_status(
            repo_path,
            InspectionStatus::Failure,
            message,
            Some(retry_count),
        )
    }

    /// Overwrites the status, message and retry count of an item
    ///
    /// `LAST_INSPECTION` is stamped with the current time. A blank message removes
    /// any previous message, and a missing retry count removes the stored one.
    pub fn set_inspection_status(
        &self,
        repo_path: &RepoPath,
        status: InspectionStatus,
        message: Option<&str>,
        retry_count: Option<u32>,
    ) -> Result<()> {
        let props = &self.property_service;
        props.set_property_from_date(repo_path, BlackDuckProperty::LastInspection, Utc::now())?;
        props.set_property(repo_path, BlackDuckProperty::InspectionStatus, status.as_str())?;

        match message.filter(|m| !m.trim().is_empty()) {
            Some(message) => {
                props.set_property(repo_path, BlackDuckProperty::InspectionStatusMessage, message)?
            }
            None => props.delete_property(repo_path, BlackDuckProperty::InspectionStatusMessage)?,
        }

        match retry_count {
            Some(count) => props.set_property(
                repo_path,
                BlackDuckProperty::InspectionRetryCount,
                &count.to_string(),
            ),
            None => props.delete_property(repo_path, BlackDuckProperty::InspectionRetryCount),
        }
    }

    pub fn get_inspection_status(&self, repo_path: &RepoPath) -> Result<Option<InspectionStatus>> {
        self.property_service
            .get_property_as(repo_path, BlackDuckProperty::InspectionStatus)
    }

    pub fn has_inspection_status(&self, repo_path: &RepoPath) -> Result<bool> {
        self.property_service
            .has_property(repo_path, BlackDuckProperty::InspectionStatus)
    }

    /// Items of a repository whose status is exactly `status`
    pub fn get_all_artifacts_in_repo_with_inspection_status(
        &self,
        repo_key: &str,
        status: InspectionStatus,
    ) -> Result<Vec<RepoPath>> {
        let mut filters = PropertyFilters::new();
        filters.insert(
            BlackDuckProperty::InspectionStatus.property_name().to_string(),
            PropertyFilter::exact(status.as_str()),
        );

        self.property_service
            .get_items_containing_properties_and_values(&filters, &[repo_key.to_string()])
    }

    pub fn assert_inspection_status(
        &self,
        repo_path: &RepoPath,
        expected: InspectionStatus,
    ) -> Result<bool> {
        Ok(self.get_inspection_status(repo_path)? == Some(expected))
    }

    pub fn assert_update_status(&self, repo_path: &RepoPath, expected: UpdateStatus) -> Result<bool> {
        let status: Option<UpdateStatus> =
            self.property_service
                .get_property_as(repo_path, BlackDuckProperty::UpdateStatus)?;
        Ok(status == Some(expected))
    }

    /// Black Duck project name of a repository, defaulting to the repository key
    pub fn get_repo_project_name(&self, repo_key: &str) -> Result<String> {
        let root = RepoPath::repository_root(repo_key)?;
        Ok(self
            .property_service
            .get_property(&root, BlackDuckProperty::ProjectName)?
            .unwrap_or_else(|| repo_key.to_string()))
    }

    /// Black Duck project version name of a repository, defaulting to the host name
    pub fn get_repo_project_version_name(&self, repo_key: &str) -> Result<String> {
        let root = RepoPath::repository_root(repo_key)?;
        Ok(self
            .property_service
            .get_property(&root, BlackDuckProperty::ProjectVersionName)?
            .unwrap_or_else(host_name))
    }

    pub fn set_repo_project_name_properties(
        &self,
        repo_key: &str,
        project_name: &str,
        project_version_name: &str,
    ) -> Result<()> {
        let root = RepoPath::repository_root(repo_key)?;
        self.property_service
            .set_property(&root, BlackDuckProperty::ProjectName, project_name)?;
        self.property_service.set_property(
            &root,
            BlackDuckProperty::ProjectVersionName,
            project_version_name,
        )
    }

    /// Stores the project version UI link, if Black Duck returned one
    pub fn update_project_ui_url(&self, repo_path: &RepoPath, ui_url: Option<&str>) -> Result<()> {
        match ui_url {
            Some(url) => self.property_service.set_property(
                repo_path,
                BlackDuckProperty::ProjectVersionUiUrl,
                url,
            ),
            None => Ok(()),
        }
    }

    pub fn get_last_update(&self, repo_path: &RepoPath) -> Result<Option<DateTime<Utc>>> {
        self.property_service
            .get_date_from_property(repo_path, BlackDuckProperty::LastUpdate)
    }

    pub fn get_last_inspection(&self, repo_path: &RepoPath) -> Result<Option<DateTime<Utc>>> {
        self.property_service
            .get_date_from_property(repo_path, BlackDuckProperty::LastInspection)
    }

    pub fn set_update_status(&self, repo_path: &RepoPath, status: UpdateStatus) -> Result<()> {
        self.property_service
            .set_property(repo_path, BlackDuckProperty::UpdateStatus, status.as_str())
    }

    pub fn set_last_update(&self, repo_path: &RepoPath, date: DateTime<Utc>) -> Result<()> {
        self.property_service
            .set_property_from_date(repo_path, BlackDuckProperty::LastUpdate, date)
    }

    pub fn get_inspection_status_message(&self, repo_path: &RepoPath) -> Result<Option<String>> {
        self.property_service
            .get_property(repo_path, BlackDuckProperty::InspectionStatusMessage)
    }

    pub fn get_retry_count(&self, repo_path: &RepoPath) -> Result<Option<i64>> {
        self.property_service
            .get_property_as_integer(repo_path, BlackDuckProperty::InspectionRetryCount)
    }

    fn failed_inspection_count(&self, repo_path: &RepoPath) -> Result<i64> {
        Ok(self.get_retry_count(repo_path)?.unwrap_or(0))
    }
}

/// Name of this host, used as the default project version name
pub fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}
