use std::fmt;

/// Vulnerability counts of a component version, by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VulnerabilityAggregate {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl VulnerabilityAggregate {
    pub fn new(high: u32, medium: u32, low: u32) -> Self {
        Self { high, medium, low }
    }

    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }
}

/// Name and version pair, used both for components and Black Duck projects
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameVersion {
    name: String,
    version: String,
}

impl NameVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for NameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}
