use std::fmt;

/// Closed set of properties the Black Duck plugin writes onto repository items
///
/// Every property carries its primary key (`blackduck.<suffix>`) and a companion
/// key (`blackduck.<suffix>.converted`) holding a time-zone localized copy for
/// date-valued properties. Both keys are static strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlackDuckProperty {
    OriginId,
    Forge,
    ComponentNameVersion,
    ProjectName,
    ProjectVersionName,
    HighVulnerabilities,
    MediumVulnerabilities,
    LowVulnerabilities,
    PolicyStatus,
    PolicySeverityTypes,
    ComponentVersionUrl,
    ProjectVersionUiUrl,
    OverallPolicyStatus,
    LastInspection,
    InspectionStatus,
    InspectionStatusMessage,
    LastUpdate,
    UpdateStatus,
    ScanTime,
    ScanResult,
    ScanResultMessage,
    PostScanActionStatus,
    PostScanPhase,
    InspectionRetryCount,
}

impl BlackDuckProperty {
    pub const ALL: [BlackDuckProperty; 24] = [
        BlackDuckProperty::OriginId,
        BlackDuckProperty::Forge,
        BlackDuckProperty::ComponentNameVersion,
        BlackDuckProperty::ProjectName,
        BlackDuckProperty::ProjectVersionName,
        BlackDuckProperty::HighVulnerabilities,
        BlackDuckProperty::MediumVulnerabilities,
        BlackDuckProperty::LowVulnerabilities,
        BlackDuckProperty::PolicyStatus,
        BlackDuckProperty::PolicySeverityTypes,
        BlackDuckProperty::ComponentVersionUrl,
        BlackDuckProperty::ProjectVersionUiUrl,
        BlackDuckProperty::OverallPolicyStatus,
        BlackDuckProperty::LastInspection,
        BlackDuckProperty::InspectionStatus,
        BlackDuckProperty::InspectionStatusMessage,
        BlackDuckProperty::LastUpdate,
        BlackDuckProperty::UpdateStatus,
        BlackDuckProperty::ScanTime,
        BlackDuckProperty::ScanResult,
        BlackDuckProperty::ScanResultMessage,
        BlackDuckProperty::PostScanActionStatus,
        BlackDuckProperty::PostScanPhase,
        BlackDuckProperty::InspectionRetryCount,
    ];

    /// Key under which the value is stored
    pub fn property_name(self) -> &'static str {
        self.names().0
    }

    /// Key of the companion property holding the localized timestamp
    pub fn time_name(self) -> &'static str {
        self.names().1
    }

    /// Looks up a property by its primary key
    pub fn from_property_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.property_name() == name)
    }

    fn names(self) -> (&'static str, &'static str) {
        match self {
            Self::OriginId => ("blackduck.originId", "blackduck.originId.converted"),
            Self::Forge => ("blackduck.forge", "blackduck.forge.converted"),
            Self::ComponentNameVersion => (
                "blackduck.componentNameVersion",
                "blackduck.componentNameVersion.converted",
            ),
            Self::ProjectName => ("blackduck.projectName", "blackduck.projectName.converted"),
            Self::ProjectVersionName => (
                "blackduck.projectVersionName",
                "blackduck.projectVersionName.converted",
            ),
            Self::HighVulnerabilities => (
                "blackduck.highVulnerabilities",
                "blackduck.highVulnerabilities.converted",
            ),
            Self::MediumVulnerabilities => (
                "blackduck.mediumVulnerabilities",
                "blackduck.mediumVulnerabilities.converted",
            ),
            Self::LowVulnerabilities => (
                "blackduck.lowVulnerabilities",
                "blackduck.lowVulnerabilities.converted",
            ),
            Self::PolicyStatus => ("blackduck.policyStatus", "blackduck.policyStatus.converted"),
            Self::PolicySeverityTypes => (
                "blackduck.policySeverityTypes",
                "blackduck.policySeverityTypes.converted",
            ),
            Self::ComponentVersionUrl => (
                "blackduck.componentVersionUrl",
                "blackduck.componentVersionUrl.converted",
            ),
            Self::ProjectVersionUiUrl => ("blackduck.uiUrl", "blackduck.uiUrl.converted"),
            Self::OverallPolicyStatus => (
                "blackduck.overallPolicyStatus",
                "blackduck.overallPolicyStatus.converted",
            ),
            Self::LastInspection => (
                "blackduck.lastInspection",
                "blackduck.lastInspection.converted",
            ),
            Self::InspectionStatus => (
                "blackduck.inspectionStatus",
                "blackduck.inspectionStatus.converted",
            ),
            Self::InspectionStatusMessage => (
                "blackduck.inspectionStatusMessage",
                "blackduck.inspectionStatusMessage.converted",
            ),
            Self::LastUpdate => ("blackduck.lastUpdate", "blackduck.lastUpdate.converted"),
            Self::UpdateStatus => ("blackduck.updateStatus", "blackduck.updateStatus.converted"),
            Self::ScanTime => ("blackduck.scanTime", "blackduck.scanTime.converted"),
            Self::ScanResult => ("blackduck.scanResult", "blackduck.scanResult.converted"),
            Self::ScanResultMessage => (
                "blackduck.scanResultMessage",
                "blackduck.scanResultMessage.converted",
            ),
            Self::PostScanActionStatus => (
                "blackduck.postScanActionStatus",
                "blackduck.postScanActionStatus.converted",
            ),
            Self::PostScanPhase => ("blackduck.postScanPhase", "blackduck.postScanPhase.converted"),
            Self::InspectionRetryCount => (
                "blackduck.inspectionRetryCount",
                "blackduck.inspectionRetryCount.converted",
            ),
        }
    }
}

impl fmt::Display for BlackDuckProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.property_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_property_uses_blackduck_prefix() {
        for property in BlackDuckProperty::ALL {
            assert!(property.property_name().starts_with("blackduck."));
        }
    }

    #[test]
    fn test_time_name_is_converted_companion() {
        for property in BlackDuckProperty::ALL {
            assert_eq!(
                property.time_name(),
                format!("{}.converted", property.property_name())
            );
        }
    }

    #[test]
    fn test_property_names_are_unique() {
        let names: HashSet<&str> = BlackDuckProperty::ALL
            .iter()
            .map(|p| p.property_name())
            .collect();
        assert_eq!(names.len(), BlackDuckProperty::ALL.len());
    }

    #[test]
    fn test_from_property_name() {
        assert_eq!(
            BlackDuckProperty::from_property_name("blackduck.inspectionStatus"),
            Some(BlackDuckProperty::InspectionStatus)
        );
        assert_eq!(
            BlackDuckProperty::from_property_name("blackduck.uiUrl"),
            Some(BlackDuckProperty::ProjectVersionUiUrl)
        );
        assert_eq!(BlackDuckProperty::from_property_name("artifactory.licenses"), None);
    }

    #[test]
    fn test_display_uses_property_name() {
        assert_eq!(
            BlackDuckProperty::InspectionRetryCount.to_string(),
            "blackduck.inspectionRetryCount"
        );
    }
}
