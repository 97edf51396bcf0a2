use std::path::{Path, PathBuf};
use std::time::Duration;

use omod_util::errors::OmodError;
use serde::{Deserialize, Serialize};

use crate::coordinate::FileType;
use crate::{GROUP_MODULE, GROUP_OPENMRS};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "omod.toml";

/// The public OpenMRS Maven repository.
pub const OPENMRS_REPOSITORY_URL: &str = "https://mavenrepo.openmrs.org/public";

/// Resolver configuration loaded from `omod.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Namespaces tried, in order, when fetching a module artifact.
    #[serde(default = "default_namespaces")]
    pub candidate_namespaces: Vec<String>,

    /// File types tried, in order, for each candidate namespace.
    #[serde(default = "default_file_types")]
    pub file_types: Vec<FileType>,

    /// Namespace prefixes recognised in `require_module` unique ids.
    #[serde(default = "default_namespaces")]
    pub known_namespaces: Vec<String>,

    /// Upper bound on artifact fetches in a single resolution run.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub verify_checksums: bool,

    /// Parent directory for the per-run working directory.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    #[serde(default = "default_repositories")]
    pub repositories: Vec<RepositoryConfig>,
}

/// A Maven repository entry from `[[repositories]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RepositoryConfig {
    pub fn openmrs() -> Self {
        Self {
            name: "openmrs".to_string(),
            url: OPENMRS_REPOSITORY_URL.to_string(),
            username: None,
            password: None,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            candidate_namespaces: default_namespaces(),
            file_types: default_file_types(),
            known_namespaces: default_namespaces(),
            max_expansions: default_max_expansions(),
            timeout_secs: default_timeout_secs(),
            verify_checksums: false,
            work_dir: None,
            repositories: default_repositories(),
        }
    }
}

fn default_namespaces() -> Vec<String> {
    vec![GROUP_MODULE.to_string(), GROUP_OPENMRS.to_string()]
}

fn default_file_types() -> Vec<FileType> {
    vec![FileType::Jar, FileType::Omod]
}

fn default_max_expansions() -> usize {
    10_000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_repositories() -> Vec<RepositoryConfig> {
    vec![RepositoryConfig::openmrs()]
}

impl ResolverConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| OmodError::Config {
            message: format!("Failed to parse {CONFIG_FILE_NAME}: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OmodError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Load configuration from `explicit` if given, otherwise from
    /// `omod.toml` in `dir` when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> miette::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> miette::Result<()> {
        let problem = if self.candidate_namespaces.is_empty() {
            Some("candidate-namespaces must not be empty")
        } else if self.file_types.is_empty() {
            Some("file-types must not be empty")
        } else if self.repositories.is_empty() {
            Some("at least one repository is required")
        } else if self.max_expansions == 0 {
            Some("max-expansions must be greater than zero")
        } else {
            None
        };
        match problem {
            Some(message) => Err(OmodError::Config {
                message: message.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
