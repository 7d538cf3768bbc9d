use std::fmt;
use std::str::FromStr;

/// Kind of Artifactory repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryType {
    Local,
    Remote,
    Virtual,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(RepositoryType::Local),
            "remote" => Ok(RepositoryType::Remote),
            "virtual" => Ok(RepositoryType::Virtual),
            _ => Err(format!(
                "Invalid repository type: {}. Please specify 'local', 'remote' or 'virtual'",
                s
            )),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryType::Local => write!(f, "local"),
            RepositoryType::Remote => write!(f, "remote"),
            RepositoryType::Virtual => write!(f, "virtual"),
        }
    }
}

/// An Artifactory repository the plugin may be told to watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    key: String,
    repository_type: RepositoryType,
}

impl Repository {
    pub fn new(key: impl Into<String>, repository_type: RepositoryType) -> Self {
        Self {
            key: key.into(),
            repository_type,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn repository_type(&self) -> RepositoryType {
        self.repository_type
    }

    /// Key the plugin actually inspects
    ///
    /// Artifacts resolved through a remote repository land in its `-cache` companion.
    pub fn inspectable_key(&self) -> String {
        match self.repository_type {
            RepositoryType::Remote => format!("{}-cache", self.key),
            RepositoryType::Local | RepositoryType::Virtual => self.key.clone(),
        }
    }
}

/// Plugin configuration entries holding a comma separated list of repository keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryList {
    Inspection,
    Scan,
}

impl RepositoryList {
    pub fn key(self) -> &'static str {
        match self {
            RepositoryList::Inspection => "blackduck.artifactory.inspect.repos",
            RepositoryList::Scan => "blackduck.artifactory.scan.repos",
        }
    }
}

impl FromStr for RepositoryList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inspection" | "inspect" => Ok(RepositoryList::Inspection),
            "scan" | "scanner" => Ok(RepositoryList::Scan),
            _ => Err(format!(
                "Invalid repository list: {}. Please specify 'inspection' or 'scan'",
                s
            )),
        }
    }
}

impl fmt::Display for RepositoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_repository_uses_cache_key() {
        let repository = Repository::new("pypi-12345", RepositoryType::Remote);
        assert_eq!(repository.inspectable_key(), "pypi-12345-cache");
    }

    #[test]
    fn test_local_and_virtual_use_key_unmodified() {
        assert_eq!(
            Repository::new("npm-local", RepositoryType::Local).inspectable_key(),
            "npm-local"
        );
        assert_eq!(
            Repository::new("maven-virtual", RepositoryType::Virtual).inspectable_key(),
            "maven-virtual"
        );
    }

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("REMOTE").unwrap(),
            RepositoryType::Remote
        );
        assert!(RepositoryType::from_str("federated").is_err());
    }

    #[test]
    fn test_repository_list_keys() {
        assert_eq!(
            RepositoryList::Inspection.key(),
            "blackduck.artifactory.inspect.repos"
        );
        assert_eq!(RepositoryList::Scan.key(), "blackduck.artifactory.scan.repos");
        assert_eq!(
            RepositoryList::from_str("scanner").unwrap(),
            RepositoryList::Scan
        );
    }
}
