//! Maven repository abstraction: URL layout and configuration.

use omod_core::config::{RepositoryConfig, OPENMRS_REPOSITORY_URL};
use omod_core::coordinate::FileType;

/// A configured Maven repository with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MavenRepository {
    pub fn from_config(entry: &RepositoryConfig) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.trim_end_matches('/').to_string(),
            username: entry.username.clone(),
            password: entry.password.clone(),
        }
    }

    /// Repository from a bare URL (e.g. a `--repo` flag).
    pub fn from_url(url: &str) -> Self {
        let url = url.trim_end_matches('/').to_string();
        Self {
            name: url.clone(),
            url,
            username: None,
            password: None,
        }
    }

    pub fn openmrs() -> Self {
        Self {
            name: "openmrs".to_string(),
            url: OPENMRS_REPOSITORY_URL.to_string(),
            username: None,
            password: None,
        }
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `org.openmrs.module:idgen-omod:4.14.0` becomes
    /// `org/openmrs/module/idgen-omod/4.14.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full URL to a specific file within the repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// URL to the artifact file of the given type.
    pub fn artifact_url(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        file_type: FileType,
    ) -> String {
        let filename = format!("{artifact}-{version}.{}", file_type.extension());
        self.file_url(group, artifact, version, &filename)
    }

    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}
