use super::property_service::PropertyService;
use crate::inspection::domain::{BlackDuckProperty, RepoPath, ScanResult, UpdateStatus};
use crate::ports::outbound::PropertyStore;
use crate::shared::Result;
use chrono::Utc;

/// Properties written by the binary scanner
pub struct ScanPropertyService<S: PropertyStore> {
    property_service: PropertyService<S>,
}

impl<S: PropertyStore> ScanPropertyService<S> {
    pub fn new(property_service: PropertyService<S>) -> Self {
        Self { property_service }
    }

    pub fn property_service(&self) -> &PropertyService<S> {
        &self.property_service
    }

    pub fn get_scan_result(&self, repo_path: &RepoPath) -> Result<Option<ScanResult>> {
        self.property_service
            .get_property_as(repo_path, BlackDuckProperty::ScanResult)
    }

    pub fn get_update_status(&self, repo_path: &RepoPath) -> Result<Option<UpdateStatus>> {
        self.property_service
            .get_property_as(repo_path, BlackDuckProperty::UpdateStatus)
    }

    /// Records a scan outcome and stamps `SCAN_TIME`
    ///
    /// A blank message removes any previous scan message.
    pub fn set_scan_result(
        &self,
        repo_path: &RepoPath,
        result: ScanResult,
        message: Option<&str>,
    ) -> Result<()> {
        let props = &self.property_service;
        props.set_property_from_date(repo_path, BlackDuckProperty::ScanTime, Utc::now())?;
        props.set_property(repo_path, BlackDuckProperty::ScanResult, result.as_str())?;

        match message.filter(|m| !m.trim().is_empty()) {
            Some(message) => {
                props.set_property(repo_path, BlackDuckProperty::ScanResultMessage, message)
            }
            None => props.delete_property(repo_path, BlackDuckProperty::ScanResultMessage),
        }
    }
}
