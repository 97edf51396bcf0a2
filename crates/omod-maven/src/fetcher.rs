//! The artifact fetcher interface consumed by the resolver, and its Maven
//! repository implementation.

use std::future::Future;
use std::path::{Path, PathBuf};

use omod_core::config::ResolverConfig;
use omod_core::coordinate::{Coordinate, FileType};
use reqwest::Client;
use thiserror::Error;

use crate::repository::MavenRepository;
use crate::{checksum, download};

/// A file produced by a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArtifact {
    pub path: PathBuf,
    /// The version actually delivered. May differ from the requested one.
    pub version: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("artifact not found: {coordinate}")]
    NotFound { coordinate: String },

    #[error("failed to fetch {coordinate}: {message}")]
    Transport { coordinate: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces a local file for a coordinate, or fails.
///
/// `coordinate.file_type` selects the artifact extension; `None` means
/// [`FileType::Jar`].
pub trait ArtifactFetcher {
    fn fetch(
        &self,
        coordinate: &Coordinate,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<FetchedArtifact, FetchError>>;
}

/// Local file name for a fetched artifact: `idgen-4.14.0.jar`.
pub fn artifact_file_name(coordinate: &Coordinate, file_type: FileType) -> String {
    format!(
        "{}-{}.{}",
        coordinate.module_id(),
        coordinate.version,
        file_type.extension()
    )
}

/// Fetches artifacts over HTTP from an ordered list of Maven repositories.
pub struct MavenFetcher {
    client: Client,
    repos: Vec<MavenRepository>,
    verify_checksums: bool,
}

impl MavenFetcher {
    pub fn new(client: Client, repos: Vec<MavenRepository>) -> Self {
        Self {
            client,
            repos,
            verify_checksums: false,
        }
    }

    /// Build a fetcher from the repositories, timeout and checksum settings in `config`.
    pub fn from_config(config: &ResolverConfig) -> miette::Result<Self> {
        let client = download::build_client(config.timeout())?;
        let repos = config
            .repositories
            .iter()
            .map(MavenRepository::from_config)
            .collect();
        Ok(Self::new(client, repos).with_checksums(config.verify_checksums))
    }

    pub fn with_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn repositories(&self) -> &[MavenRepository] {
        &self.repos
    }
}

impl ArtifactFetcher for MavenFetcher {
    async fn fetch(
        &self,
        coordinate: &Coordinate,
        dest_dir: &Path,
    ) -> Result<FetchedArtifact, FetchError> {
        let file_type = coordinate.file_type.unwrap_or(FileType::Jar);
        let mut last_err = None;

        for repo in &self.repos {
            let url = repo.artifact_url(
                &coordinate.namespace,
                &coordinate.identifier,
                &coordinate.version,
                file_type,
            );
            tracing::debug!("Trying {url}");

            let data = match download::download_bytes(&self.client, repo, &url).await {
                Ok(Some(data)) => data,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("{} failed for {coordinate}: {e}", repo.name);
                    last_err = Some(e.to_string());
                    continue;
                }
            };

            if self.verify_checksums {
                checksum::verify(&self.client, repo, &url, &data)
                    .await
                    .map_err(|e| FetchError::Transport {
                        coordinate: coordinate.to_string(),
                        message: e.to_string(),
                    })?;
            }

            let filename = artifact_file_name(coordinate, file_type);
            let path = omod_util::fs::write_file_in(dest_dir, &filename, &data)?;
            tracing::debug!("Fetched {coordinate} from {} to {}", repo.name, path.display());
            return Ok(FetchedArtifact {
                path,
                version: coordinate.version.clone(),
            });
        }

        match last_err {
            Some(message) => Err(FetchError::Transport {
                coordinate: coordinate.to_string(),
                message,
            }),
            None => Err(FetchError::NotFound {
                coordinate: coordinate.to_string(),
            }),
        }
    }
}
