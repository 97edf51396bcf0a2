//! Module descriptor reading: the `require_module` declarations inside an
//! artifact's `config.xml`.
//!
//! The descriptor travels inside downloaded archives, so it is treated as
//! untrusted. It is read as a plain event stream: DOCTYPE declarations are
//! skipped without loading anything they reference, and entity references
//! beyond the predefined XML ones are rejected instead of expanded.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use omod_core::coordinate::Coordinate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use zip::result::ZipError;

/// Archive entry holding the module descriptor.
pub const DESCRIPTOR_ENTRY: &str = "config.xml";

const REQUIRE_MODULE_TAG: &[u8] = b"require_module";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read archive {}: {message}", path.display())]
    Archive { path: PathBuf, message: String },

    #[error("malformed {DESCRIPTOR_ENTRY}: {message}")]
    Parse { message: String },

    #[error("unsupported module id format: {uid}")]
    UnsupportedIdentifierFormat { uid: String },
}

/// Extract the modules required by the artifact at `artifact`.
///
/// An archive without a descriptor is a leaf and yields an empty list.
pub fn required_modules(
    artifact: &Path,
    known_namespaces: &[String],
) -> Result<Vec<Coordinate>, ManifestError> {
    match read_descriptor(artifact)? {
        Some(xml) => parse_required_modules(&xml, known_namespaces),
        None => {
            tracing::debug!("No {DESCRIPTOR_ENTRY} in {}", artifact.display());
            Ok(Vec::new())
        }
    }
}

fn read_descriptor(artifact: &Path) -> Result<Option<String>, ManifestError> {
    let archive_err = |message: String| ManifestError::Archive {
        path: artifact.to_path_buf(),
        message,
    };

    let file = File::open(artifact).map_err(|e| archive_err(e.to_string()))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_err(e.to_string()))?;
    let mut entry = match archive.by_name(DESCRIPTOR_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(archive_err(e.to_string())),
    };

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| archive_err(format!("failed to read {DESCRIPTOR_ENTRY}: {e}")))?;
    Ok(Some(xml))
}

/// A `require_module` element whose text is still being collected.
struct PendingRequirement {
    version: String,
    uid: String,
}

/// Parse `require_module` declarations from descriptor XML.
///
/// Any unsupported unique id fails the whole descriptor; nothing collected
/// before it is returned.
pub fn parse_required_modules(
    xml: &str,
    known_namespaces: &[String],
) -> Result<Vec<Coordinate>, ManifestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut modules = Vec::new();
    let mut current: Option<PendingRequirement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == REQUIRE_MODULE_TAG => {
                current = Some(PendingRequirement {
                    version: version_attribute(e)?,
                    uid: String::new(),
                });
            }
            Ok(Event::Text(ref e)) => {
                if let Some(pending) = current.as_mut() {
                    let text = e.unescape().map_err(|err| parse_error(&reader, err))?;
                    pending.uid.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(pending) = current.as_mut() {
                    pending.uid.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == REQUIRE_MODULE_TAG => {
                if let Some(pending) = current.take() {
                    if let Some(coord) =
                        split_unique_id(pending.uid.trim(), &pending.version, known_namespaces)?
                    {
                        modules.push(coord);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(&reader, e)),
            // Self-closing <require_module/> has no unique id; DOCTYPE is never resolved.
            _ => {}
        }
    }

    Ok(modules)
}

fn version_attribute(element: &BytesStart<'_>) -> Result<String, ManifestError> {
    let attr = element
        .try_get_attribute("version")
        .map_err(|e| ManifestError::Parse {
            message: format!("bad attribute on <require_module>: {e}"),
        })?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(|e| ManifestError::Parse {
                message: format!("bad version attribute: {e}"),
            })?;
            Ok(value.trim().to_string())
        }
        None => Ok(String::new()),
    }
}

fn parse_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> ManifestError {
    ManifestError::Parse {
        message: format!("{err} (at byte {})", reader.buffer_position()),
    }
}

/// Split `org.openmrs.module.idgen` into namespace and identifier.
///
/// Ids without a `.` are skipped. The longest matching known namespace wins.
fn split_unique_id(
    uid: &str,
    version: &str,
    known_namespaces: &[String],
) -> Result<Option<Coordinate>, ManifestError> {
    if !uid.contains('.') {
        tracing::debug!("Skipping require_module without namespace: {uid:?}");
        return Ok(None);
    }

    let best = known_namespaces
        .iter()
        .filter_map(|ns| {
            let rest = uid.strip_prefix(ns.as_str())?.strip_prefix('.')?;
            (!rest.is_empty()).then_some((ns, rest))
        })
        .max_by_key(|(ns, _)| ns.len());

    match best {
        Some((namespace, identifier)) => Ok(Some(Coordinate::new(
            namespace.as_str(),
            identifier,
            version,
        ))),
        None => Err(ManifestError::UnsupportedIdentifierFormat {
            uid: uid.to_string(),
        }),
    }
}
