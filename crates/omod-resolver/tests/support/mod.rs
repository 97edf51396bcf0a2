//! In-memory artifact fetcher for resolver tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;

use omod_core::coordinate::{Coordinate, FileType};
use omod_maven::fetcher::{artifact_file_name, ArtifactFetcher, FetchError, FetchedArtifact};
use zip::write::SimpleFileOptions;

type Key = (String, String, String, FileType);

/// Serves canned archives keyed by namespace, artifact id, version and file type.
#[derive(Default)]
pub struct FakeFetcher {
    artifacts: HashMap<Key, (String, Vec<u8>)>,
    calls: RefCell<Vec<Coordinate>>,
}

/// Build a zip archive with the given entries.
pub fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A `config.xml` requiring the given `(unique id, version)` pairs.
pub fn config_xml(requires: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<module configVersion=\"1.6\">\n<require_modules>\n",
    );
    for (uid, version) in requires {
        xml.push_str(&format!(
            "<require_module version=\"{version}\">{uid}</require_module>\n"
        ));
    }
    xml.push_str("</require_modules>\n</module>\n");
    xml
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `.jar` in `org.openmrs.module` whose manifest requires `requires`.
    pub fn module(self, artifact: &str, version: &str, requires: &[(&str, &str)]) -> Self {
        let bytes = archive(&[("config.xml", &config_xml(requires))]);
        self.raw("org.openmrs.module", artifact, version, FileType::Jar, version, bytes)
    }

    /// Serve `bytes` for the exact key, reporting `delivered` as the fetched version.
    pub fn raw(
        mut self,
        namespace: &str,
        artifact: &str,
        requested: &str,
        file_type: FileType,
        delivered: &str,
        bytes: Vec<u8>,
    ) -> Self {
        self.artifacts.insert(
            (
                namespace.to_string(),
                artifact.to_string(),
                requested.to_string(),
                file_type,
            ),
            (delivered.to_string(), bytes),
        );
        self
    }

    pub fn calls(&self) -> Vec<Coordinate> {
        self.calls.borrow().clone()
    }

    /// Fetch attempts for one artifact id, in order.
    pub fn calls_for(&self, artifact: &str) -> Vec<Coordinate> {
        self.calls()
            .into_iter()
            .filter(|c| c.identifier == artifact)
            .collect()
    }
}

impl ArtifactFetcher for FakeFetcher {
    async fn fetch(
        &self,
        coordinate: &Coordinate,
        dest_dir: &Path,
    ) -> Result<FetchedArtifact, FetchError> {
        self.calls.borrow_mut().push(coordinate.clone());
        let file_type = coordinate.file_type.unwrap_or(FileType::Jar);
        let key = (
            coordinate.namespace.clone(),
            coordinate.identifier.clone(),
            coordinate.version.clone(),
            file_type,
        );
        let Some((delivered, bytes)) = self.artifacts.get(&key) else {
            return Err(FetchError::NotFound {
                coordinate: coordinate.to_string(),
            });
        };
        let path = dest_dir.join(artifact_file_name(coordinate, file_type));
        std::fs::write(&path, bytes)?;
        Ok(FetchedArtifact {
            path,
            version: delivered.clone(),
        })
    }
}
