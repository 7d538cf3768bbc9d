use crate::shared::error::PropertyError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for repository keys (Artifactory limit)
const MAX_REPO_KEY_LENGTH: usize = 64;

/// Location of an item inside an Artifactory repository
///
/// A `RepoPath` is only ever used as a lookup key for properties; it is never mutated.
/// The repository root is represented by an empty relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoPath {
    repo_key: String,
    path: String,
}

impl RepoPath {
    pub fn new(repo_key: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let repo_key = repo_key.into();
        validate_repo_key(&repo_key)?;
        let path: String = path.into();
        let path = path.trim_matches('/').to_string();

        Ok(Self { repo_key, path })
    }

    /// The path pointing at the repository itself
    pub fn repository_root(repo_key: impl Into<String>) -> Result<Self> {
        Self::new(repo_key, "")
    }

    /// Parses `<repo-key>[/<relative path>]`, ignoring leading slashes
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(PropertyError::InvalidRepoPath {
                path: value.to_string(),
                reason: "Path cannot be empty".to_string(),
            }
            .into());
        }

        match trimmed.split_once('/') {
            Some((repo_key, path)) => Self::new(repo_key, path),
            None => Self::repository_root(trimmed),
        }
    }

    pub fn repo_key(&self) -> &str {
        &self.repo_key
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn to_path(&self) -> String {
        if self.is_root() {
            self.repo_key.clone()
        } else {
            format!("{}/{}", self.repo_key, self.path)
        }
    }
}

fn validate_repo_key(repo_key: &str) -> Result<()> {
    let reason = if repo_key.trim().is_empty() {
        Some("Repository key cannot be empty".to_string())
    } else if repo_key.len() > MAX_REPO_KEY_LENGTH {
        Some(format!(
            "Repository key is too long ({} bytes). Maximum allowed: {} bytes",
            repo_key.len(),
            MAX_REPO_KEY_LENGTH
        ))
    } else if !repo_key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        Some("Repository key may only contain alphanumerics, hyphens, underscores and dots".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PropertyError::InvalidRepoPath {
            path: repo_key.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

impl FromStr for RepoPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
