//! Per-module resolution failures.
//!
//! None of these escape [`crate::resolver::ModuleResolver::resolve`]; each is
//! recorded as an unresolved entry for the module it belongs to.

use miette::Diagnostic;
use omod_core::coordinate::ModuleId;
use thiserror::Error;

use crate::manifest::ManifestError;
use crate::version::InvalidVersion;

#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersion),

    #[error("no artifact for {identifier}:{version} after {attempts} namespace/file type combinations")]
    #[diagnostic(help("Check the module id and version, or add the repository that hosts it"))]
    ArtifactNotFound {
        identifier: String,
        version: String,
        attempts: usize,
    },

    #[error("manifest of {module} could not be read: {message}")]
    ManifestParse { module: ModuleId, message: String },

    #[error("manifest of {module} declares unsupported module id '{uid}'")]
    UnsupportedIdentifierFormat { module: ModuleId, uid: String },

    #[error("expansion limit of {limit} fetches reached")]
    #[diagnostic(help("Raise max-expansions in omod.toml if the module graph is genuinely this large"))]
    ExpansionLimit { limit: usize },
}

impl ResolveError {
    pub fn from_manifest(module: &ModuleId, err: ManifestError) -> Self {
        match err {
            ManifestError::UnsupportedIdentifierFormat { uid } => {
                ResolveError::UnsupportedIdentifierFormat {
                    module: module.clone(),
                    uid,
                }
            }
            other => ResolveError::ManifestParse {
                module: module.clone(),
                message: other.to_string(),
            },
        }
    }
}
