use std::fmt;
use std::str::FromStr;

/// Overall policy status of a component version in Black Duck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicySummaryStatus {
    InViolation,
    InViolationOverridden,
    NotInViolation,
}

impl PolicySummaryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicySummaryStatus::InViolation => "IN_VIOLATION",
            PolicySummaryStatus::InViolationOverridden => "IN_VIOLATION_OVERRIDDEN",
            PolicySummaryStatus::NotInViolation => "NOT_IN_VIOLATION",
        }
    }
}

impl FromStr for PolicySummaryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IN_VIOLATION" => Ok(PolicySummaryStatus::InViolation),
            "IN_VIOLATION_OVERRIDDEN" => Ok(PolicySummaryStatus::InViolationOverridden),
            "NOT_IN_VIOLATION" => Ok(PolicySummaryStatus::NotInViolation),
            _ => Err(format!("Invalid policy status: {}", s)),
        }
    }
}

impl fmt::Display for PolicySummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a violated policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicySeverity {
    Blocker,
    Critical,
    Major,
    Minor,
    Trivial,
    Unspecified,
}

impl PolicySeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicySeverity::Blocker => "BLOCKER",
            PolicySeverity::Critical => "CRITICAL",
            PolicySeverity::Major => "MAJOR",
            PolicySeverity::Minor => "MINOR",
            PolicySeverity::Trivial => "TRIVIAL",
            PolicySeverity::Unspecified => "UNSPECIFIED",
        }
    }
}

impl FromStr for PolicySeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BLOCKER" => Ok(PolicySeverity::Blocker),
            "CRITICAL" => Ok(PolicySeverity::Critical),
            "MAJOR" => Ok(PolicySeverity::Major),
            "MINOR" => Ok(PolicySeverity::Minor),
            "TRIVIAL" => Ok(PolicySeverity::Trivial),
            "UNSPECIFIED" => Ok(PolicySeverity::Unspecified),
            _ => Err(format!("Invalid policy severity: {}", s)),
        }
    }
}

impl fmt::Display for PolicySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy evaluation of a single component version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStatusReport {
    status: PolicySummaryStatus,
    severity_types: Vec<PolicySeverity>,
}

impl PolicyStatusReport {
    pub fn new(status: PolicySummaryStatus, severity_types: Vec<PolicySeverity>) -> Self {
        Self {
            status,
            severity_types,
        }
    }

    pub fn status(&self) -> PolicySummaryStatus {
        self.status
    }

    pub fn severity_types(&self) -> &[PolicySeverity] {
        &self.severity_types
    }

    /// Comma separated severities, or `None` when no rule was violated
    pub fn joined_severity_types(&self) -> Option<String> {
        if self.severity_types.is_empty() {
            return None;
        }

        Some(
            self.severity_types
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
