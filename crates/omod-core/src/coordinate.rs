use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix carried by the artifact id of an OpenMRS module package.
pub const OMOD_SUFFIX: &str = "-omod";

/// Artifact-id suffixes stripped when deriving a [`ModuleId`].
const MODULE_SUFFIXES: [&str; 2] = ["-omod", "-module"];

/// File type (extension) of a fetchable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain binary package.
    Jar,
    /// OpenMRS module package.
    Omod,
}

impl FileType {
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Jar => "jar",
            FileType::Omod => "omod",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown file type '{0}' (expected 'jar' or 'omod')")]
pub struct UnknownFileType(pub String);

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jar" => Ok(FileType::Jar),
            "omod" => Ok(FileType::Omod),
            _ => Err(UnknownFileType(s.to_string())),
        }
    }
}

/// Logical module identity: the artifact id with `-omod` / `-module` stripped.
///
/// `idgen-omod` and `idgen` name the same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn from_artifact(artifact_id: &str) -> Self {
        let stripped = MODULE_SUFFIXES
            .iter()
            .find_map(|suffix| artifact_id.strip_suffix(suffix))
            .unwrap_or(artifact_id);
        Self(stripped.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ensure an artifact id carries the `-omod` convention.
pub fn module_artifact_id(identifier: &str) -> String {
    if identifier.contains(OMOD_SUFFIX) {
        identifier.to_string()
    } else {
        format!("{identifier}{OMOD_SUFFIX}")
    }
}

/// A fetchable artifact coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub namespace: String,
    pub identifier: String,
    pub version: String,
    /// Chosen per fetch attempt; `None` for declared dependencies.
    pub file_type: Option<FileType>,
}

impl Coordinate {
    pub fn new(
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            identifier: identifier.into(),
            version: version.into(),
            file_type: None,
        }
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    pub fn module_id(&self) -> ModuleId {
        ModuleId::from_artifact(&self.identifier)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.identifier, self.version)?;
        if let Some(file_type) = self.file_type {
            write!(f, ":{file_type}")?;
        }
        Ok(())
    }
}
