use std::fmt;
use std::str::FromStr;

/// Outcome of the latest Black Duck inspection of an item
///
/// The absence of an inspection status property is the initial state and
/// is modelled as `Option::None`, not as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionStatus {
    Pending,
    Success,
    Failure,
}

impl InspectionStatus {
    pub const ALL: [InspectionStatus; 3] = [
        InspectionStatus::Pending,
        InspectionStatus::Success,
        InspectionStatus::Failure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InspectionStatus::Pending => "PENDING",
            InspectionStatus::Success => "SUCCESS",
            InspectionStatus::Failure => "FAILURE",
        }
    }
}

impl FromStr for InspectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(InspectionStatus::Pending),
            "SUCCESS" => Ok(InspectionStatus::Success),
            "FAILURE" => Ok(InspectionStatus::Failure),
            _ => Err(format!(
                "Invalid inspection status: {}. Expected one of PENDING, SUCCESS, FAILURE",
                s
            )),
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the Black Duck data mirrored onto an item is current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateStatus {
    UpToDate,
    OutOfDate,
}

impl UpdateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateStatus::UpToDate => "UP_TO_DATE",
            UpdateStatus::OutOfDate => "OUT_OF_DATE",
        }
    }
}

impl FromStr for UpdateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP_TO_DATE" => Ok(UpdateStatus::UpToDate),
            "OUT_OF_DATE" => Ok(UpdateStatus::OutOfDate),
            _ => Err(format!(
                "Invalid update status: {}. Expected UP_TO_DATE or OUT_OF_DATE",
                s
            )),
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the most recent binary scan of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanResult {
    Success,
    Failure,
}

impl ScanResult {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanResult::Success => "SUCCESS",
            ScanResult::Failure => "FAILURE",
        }
    }
}

impl FromStr for ScanResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SUCCESS" => Ok(ScanResult::Success),
            "FAILURE" => Ok(ScanResult::Failure),
            _ => Err(format!(
                "Invalid scan result: {}. Expected SUCCESS or FAILURE",
                s
            )),
        }
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
