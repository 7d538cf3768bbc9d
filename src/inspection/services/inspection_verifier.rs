use super::inspection_property_service::InspectionPropertyService;
use crate::inspection::domain::{BlackDuckProperty, InspectionStatus, RepoPath};
use crate::ports::outbound::{ProgressReporter, PropertyStore};
use crate::shared::error::PropertyError;
use crate::shared::Result;
use std::fmt;
use std::thread;
use std::time::Duration;

/// Properties an item must carry after a successful inspection
const SUCCESS_REQUIRED: &[BlackDuckProperty] = &[
    BlackDuckProperty::LastInspection,
    BlackDuckProperty::HighVulnerabilities,
    BlackDuckProperty::MediumVulnerabilities,
    BlackDuckProperty::LowVulnerabilities,
    BlackDuckProperty::PolicyStatus,
    BlackDuckProperty::ComponentVersionUrl,
    BlackDuckProperty::OriginId,
    BlackDuckProperty::Forge,
];

/// Properties an item must not carry after a successful inspection
const SUCCESS_FORBIDDEN: &[BlackDuckProperty] = &[
    BlackDuckProperty::InspectionRetryCount,
    BlackDuckProperty::InspectionStatusMessage,
];

/// Properties an item must carry after a failed inspection
const FAILURE_REQUIRED: &[BlackDuckProperty] = &[
    BlackDuckProperty::InspectionRetryCount,
    BlackDuckProperty::InspectionStatusMessage,
    BlackDuckProperty::LastInspection,
];

const NO_PROPERTIES: &[BlackDuckProperty] = &[];

/// A single way in which an item's properties disagree with the expected outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    StatusMismatch {
        expected: InspectionStatus,
        actual: Option<InspectionStatus>,
    },
    MissingProperty(BlackDuckProperty),
    UnexpectedProperty(BlackDuckProperty),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::StatusMismatch {
                expected,
                actual: Some(actual),
            } => write!(f, "Inspection status should be {} but was {}", expected, actual),
            Violation::StatusMismatch {
                expected,
                actual: None,
            } => write!(f, "Inspection status should be {} but is not set", expected),
            Violation::MissingProperty(property) => {
                write!(f, "Missing property {}", property.property_name())
            }
            Violation::UnexpectedProperty(property) => {
                write!(f, "Unexpected property {}", property.property_name())
            }
        }
    }
}

/// Checks that the plugin left an item in the expected inspection state
///
/// # Type Parameters
/// * `S` - PropertyStore implementation
/// * `P` - ProgressReporter implementation
pub struct InspectionVerifier<'a, S: PropertyStore, P: ProgressReporter> {
    inspection_service: &'a InspectionPropertyService<S>,
    progress_reporter: &'a P,
}

impl<'a, S: PropertyStore, P: ProgressReporter> InspectionVerifier<'a, S, P> {
    pub fn new(inspection_service: &'a InspectionPropertyService<S>, progress_reporter: &'a P) -> Self {
        Self {
            inspection_service,
            progress_reporter,
        }
    }

    /// Lists every violation of the expected end state; empty means the item is consistent
    ///
    /// PENDING only checks the status itself.
    pub fn verify(&self, repo_path: &RepoPath, expected: InspectionStatus) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();

        let actual = self.inspection_service.get_inspection_status(repo_path)?;
        if actual != Some(expected) {
            violations.push(Violation::StatusMismatch { expected, actual });
        }

        let (required, forbidden) = match expected {
            InspectionStatus::Success => (SUCCESS_REQUIRED, SUCCESS_FORBIDDEN),
            InspectionStatus::Failure => (FAILURE_REQUIRED, NO_PROPERTIES),
            InspectionStatus::Pending => (NO_PROPERTIES, NO_PROPERTIES),
        };

        let props = self.inspection_service.property_service();
        for property in required {
            if props.get_property(repo_path, *property)?.is_none() {
                violations.push(Violation::MissingProperty(*property));
            }
        }
        for property in forbidden {
            if props.has_property(repo_path, *property)? {
                violations.push(Violation::UnexpectedProperty(*property));
            }
        }

        Ok(violations)
    }

    /// Polls an item until it reaches `expected`
    ///
    /// While no status is set the item is polled again. A different status requires
    /// a retry count; once that count reaches the maximum the inspection is treated
    /// as failed for good.
    ///
    /// # Errors
    /// * [`PropertyError::MissingProperty`] when a mismatching status has no retry count
    /// * [`PropertyError::InspectionFailed`] when the retry budget is exhausted
    /// * [`PropertyError::InspectionTimedOut`] when `attempts` polls did not succeed
    pub fn wait_for_inspection(
        &self,
        repo_path: &RepoPath,
        expected: InspectionStatus,
        attempts: u32,
        interval: Duration,
    ) -> Result<()> {
        let max_retry_count = i64::from(self.inspection_service.max_retry_count());
        let props = self.inspection_service.property_service();

        for attempt in 1..=attempts {
            match self.inspection_service.get_inspection_status(repo_path)? {
                Some(status) if status == expected => {
                    tracing::info!("{} reached inspection status {}", repo_path, expected);
                    self.progress_reporter.report_completion(&format!(
                        "✅ {} reached inspection status {}",
                        repo_path, expected
                    ));
                    return Ok(());
                }
                Some(status) => {
                    let retry_count: i64 = props
                        .get_required_property(repo_path, BlackDuckProperty::InspectionRetryCount)?
                        .parse()?;

                    if retry_count >= max_retry_count {
                        return Err(PropertyError::InspectionFailed {
                            repo_path: repo_path.to_path(),
                            details: format!(
                                "Status is {} and the retry count {} reached the maximum of {}",
                                status, retry_count, max_retry_count
                            ),
                        }
                        .into());
                    }
                    tracing::debug!(
                        "{} has status {} after {} retries",
                        repo_path,
                        status,
                        retry_count
                    );
                }
                None => tracing::debug!("{} has no inspection status yet", repo_path),
            }

            self.progress_reporter.report_progress(
                attempt as usize,
                attempts as usize,
                Some("Waiting for inspection..."),
            );
            if attempt < attempts {
                thread::sleep(interval);
            }
        }

        self.progress_reporter
            .report_error(&format!("❌ Gave up waiting for {}", repo_path));
        Err(PropertyError::InspectionTimedOut {
            repo_path: repo_path.to_path(),
            expected: expected.to_string(),
            attempts,
        }
        .into())
    }
}
