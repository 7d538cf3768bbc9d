use crate::inspection::domain::RepoPath;
use crate::ports::outbound::{PropertyFilters, PropertyStore};
use crate::shared::error::PropertyError;
use crate::shared::Result;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Username and password for Artifactory basic authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactoryCredentials {
    pub username: String,
    pub password: String,
}

/// ArtifactoryPropertyStore adapter for the Artifactory item properties REST API
///
/// Uses the storage API for single-item reads and writes and the property
/// search API for `items_by_properties`.
///
/// # Security
/// - Implements timeout (10 seconds)
/// - Does not retry failed requests; retries are a caller concern
pub struct ArtifactoryPropertyStore {
    client: Client,
    base_url: String,
    credentials: Option<ArtifactoryCredentials>,
}

impl ArtifactoryPropertyStore {
    const TIMEOUT_SECONDS: u64 = 10;
    const STORAGE_API: &'static str = "api/storage";
    const PROPERTY_SEARCH_API: &'static str = "api/search/prop";

    /// Creates a client for the Artifactory instance at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - e.g. `http://localhost:8081/artifactory`
    /// * `credentials` - Basic authentication, if the instance requires it
    pub fn new(base_url: &str, credentials: Option<ArtifactoryCredentials>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(PropertyError::Validation {
                message: "Artifactory URL cannot be empty".to_string(),
            }
            .into());
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PropertyError::Validation {
                message: format!(
                    "Artifactory URL must start with http:// or https://: {}",
                    base_url
                ),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("artifactory-inspection/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn storage_url(&self, repo_path: &RepoPath) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            Self::STORAGE_API,
            encode_repo_path(repo_path)
        )
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        self.authenticate(request).send().map_err(|e| {
            PropertyError::StoreError {
                operation: operation.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn fail(operation: &str, response: Response) -> anyhow::Error {
        PropertyError::StoreError {
            operation: operation.to_string(),
            details: format!("Artifactory returned status code {}", response.status()),
        }
        .into()
    }

    /// Reads one property of an item; `None` when the item or the property is absent
    fn fetch_property(&self, repo_path: &RepoPath, name: &str) -> Result<Option<Vec<String>>> {
        let url = format!(
            "{}?properties={}",
            self.storage_url(repo_path),
            urlencoding::encode(name)
        );
        let operation = format!("GET properties of {}", repo_path);
        let response = self.send(self.client.get(&url), &operation)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail(&operation, response));
        }

        let item: ItemProperties = response.json()?;
        Ok(item.properties.get(name).cloned())
    }
}

impl PropertyStore for ArtifactoryPropertyStore {
    fn has_property(&self, repo_path: &RepoPath, name: &str) -> Result<bool> {
        Ok(self.fetch_property(repo_path, name)?.is_some())
    }

    fn get_property_values(&self, repo_path: &RepoPath, name: &str) -> Result<Vec<String>> {
        Ok(self.fetch_property(repo_path, name)?.unwrap_or_default())
    }

    fn set_property(&self, repo_path: &RepoPath, name: &str, value: &str) -> Result<()> {
        let url = format!(
            "{}?properties={}={}&recursive=0",
            self.storage_url(repo_path),
            urlencoding::encode(name),
            urlencoding::encode(&escape_property_value(value))
        );
        let operation = format!("PUT property {} on {}", name, repo_path);
        let response = self.send(self.client.put(&url), &operation)?;

        if !response.status().is_success() {
            return Err(Self::fail(&operation, response));
        }
        Ok(())
    }

    fn delete_property(&self, repo_path: &RepoPath, name: &str) -> Result<()> {
        let url = format!(
            "{}?properties={}&recursive=0",
            self.storage_url(repo_path),
            urlencoding::encode(name)
        );
        let operation = format!("DELETE property {} from {}", name, repo_path);
        let response = self.send(self.client.delete(&url), &operation)?;

        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }
        Err(Self::fail(&operation, response))
    }

    fn items_by_properties(
        &self,
        filters: &PropertyFilters,
        repo_keys: &[String],
    ) -> Result<Vec<RepoPath>> {
        let url = property_search_url(&self.base_url, filters, repo_keys)?;
        let operation = "Property search".to_string();
        let response = self.send(self.client.get(&url), &operation)?;

        if !response.status().is_success() {
            return Err(Self::fail(&operation, response));
        }

        let search: PropertySearchResponse = response.json()?;
        let mut found = Vec::with_capacity(search.results.len());
        for result in search.results {
            match repo_path_from_storage_uri(&result.uri) {
                Some(repo_path) => found.push(repo_path),
                None => tracing::warn!("Ignoring unexpected search result uri: {}", result.uri),
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }
}

// Artifactory API response structures

#[derive(Debug, Deserialize)]
struct ItemProperties {
    #[serde(default)]
    properties: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PropertySearchResponse {
    #[serde(default)]
    results: Vec<PropertySearchResult>,
}

#[derive(Debug, Deserialize)]
struct PropertySearchResult {
    uri: String,
}

/// Escapes the characters Artifactory treats as separators in property values
fn escape_property_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ',' | '|' | '=') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn encode_repo_path(repo_path: &RepoPath) -> String {
    repo_path
        .to_path()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn property_search_url(
    base_url: &str,
    filters: &PropertyFilters,
    repo_keys: &[String],
) -> Result<String> {
    if filters.is_empty() {
        return Err(PropertyError::Validation {
            message: "A property search needs at least one property".to_string(),
        }
        .into());
    }

    let mut query: Vec<String> = filters
        .iter()
        .map(|(name, filter)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(filter.as_query_value())
            )
        })
        .collect();

    if !repo_keys.is_empty() {
        let repos = repo_keys
            .iter()
            .map(|key| urlencoding::encode(key).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        query.push(format!("repos={}", repos));
    }

    Ok(format!(
        "{}/{}?{}",
        base_url,
        ArtifactoryPropertyStore::PROPERTY_SEARCH_API,
        query.join("&")
    ))
}

/// Extracts the item from `.../api/storage/<repo>/<path>`
fn repo_path_from_storage_uri(uri: &str) -> Option<RepoPath> {
    let marker = "/api/storage/";
    let start = uri.find(marker)? + marker.len();
    let decoded = urlencoding::decode(&uri[start..]).ok()?;
    RepoPath::parse(&decoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::PropertyFilter;

    #[test]
    fn test_artifactory_client_creation() {
        let store = ArtifactoryPropertyStore::new("http://localhost:8081/artifactory/", None);
        assert!(store.is_ok());
        assert_eq!(
            store.unwrap().base_url(),
            "http://localhost:8081/artifactory"
        );
    }

    #[test]
    fn test_artifactory_client_rejects_invalid_url() {
        assert!(ArtifactoryPropertyStore::new("", None).is_err());
        assert!(ArtifactoryPropertyStore::new("localhost:8081", None).is_err());
    }

    #[test]
    fn test_escape_property_value() {
        assert_eq!(escape_property_value("plain"), "plain");
        assert_eq!(escape_property_value("MAJOR,MINOR"), "MAJOR\\,MINOR");
        assert_eq!(escape_property_value("a=b|c\\d"), "a\\=b\\|c\\\\d");
    }

    #[test]
    fn test_storage_url_encodes_segments() {
        let store = ArtifactoryPropertyStore::new("http://localhost:8081/artifactory", None).unwrap();
        let item = RepoPath::new("npm-remote-cache", "@types/node/-/node 20.tgz").unwrap();
        assert_eq!(
            store.storage_url(&item),
            "http://localhost:8081/artifactory/api/storage/npm-remote-cache/%40types/node/-/node%2020.tgz"
        );
    }

    #[test]
    fn test_property_search_url() {
        let mut filters = PropertyFilters::new();
        filters.insert("blackduck.inspectionStatus".to_string(), PropertyFilter::Any);
        let url = property_search_url(
            "http://localhost:8081/artifactory",
            &filters,
            &["npm-local".to_string(), "pypi-remote-cache".to_string()],
        )
        .unwrap();

        assert_eq!(
            url,
            "http://localhost:8081/artifactory/api/search/prop?blackduck.inspectionStatus=%2A&repos=npm-local,pypi-remote-cache"
        );
    }

    #[test]
    fn test_property_search_url_requires_filter() {
        assert!(property_search_url("http://localhost", &PropertyFilters::new(), &[]).is_err());
    }

    #[test]
    fn test_repo_path_from_storage_uri() {
        let repo_path = repo_path_from_storage_uri(
            "http://localhost:8081/artifactory/api/storage/pypi-remote-cache/requests/requests-2.31.0.tar.gz",
        )
        .unwrap();
        assert_eq!(repo_path.repo_key(), "pypi-remote-cache");
        assert_eq!(repo_path.path(), "requests/requests-2.31.0.tar.gz");

        assert!(repo_path_from_storage_uri("http://localhost/api/search/prop").is_none());
    }

    #[test]
    fn test_item_properties_deserialization() {
        let item: ItemProperties = serde_json::from_str(
            r#"{"properties": {"blackduck.forge": ["npmjs"]}, "uri": "http://x/api/storage/a/b"}"#,
        )
        .unwrap();
        assert_eq!(
            item.properties.get("blackduck.forge"),
            Some(&vec!["npmjs".to_string()])
        );
    }
}
