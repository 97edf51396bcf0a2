//! Module version parsing and comparison.
//!
//! A version is a dotted numeric base with an optional qualifier after the
//! first `-`:
//! - Base segments compare as numbers; missing trailing segments count as 0
//! - A release outranks any qualified version with the same base
//! - Known qualifiers order `alpha` < `beta` < `SNAPSHOT` (case-insensitive)
//! - Unknown qualifiers sort below every known one, then by text

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{version}': {reason}")]
pub struct InvalidVersion {
    pub version: String,
    pub reason: String,
}

impl InvalidVersion {
    fn new(version: &str, reason: impl Into<String>) -> Self {
        Self {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}

/// A parsed, comparable module version.
#[derive(Debug, Clone)]
pub struct ModuleVersion {
    original: String,
    base: Vec<u64>,
    qualifier: Option<Qualifier>,
}

#[derive(Debug, Clone)]
enum Qualifier {
    Known(KnownQualifier),
    Unknown(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum KnownQualifier {
    Alpha,
    Beta,
    Snapshot,
}

impl Qualifier {
    fn classify(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "alpha" => Qualifier::Known(KnownQualifier::Alpha),
            "beta" => Qualifier::Known(KnownQualifier::Beta),
            "snapshot" => Qualifier::Known(KnownQualifier::Snapshot),
            _ => Qualifier::Unknown(text.to_string()),
        }
    }
}

impl Ord for Qualifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Qualifier::Known(a), Qualifier::Known(b)) => a.cmp(b),
            (Qualifier::Unknown(_), Qualifier::Known(_)) => Ordering::Less,
            (Qualifier::Known(_), Qualifier::Unknown(_)) => Ordering::Greater,
            (Qualifier::Unknown(a), Qualifier::Unknown(b)) => a
                .to_ascii_lowercase()
                .cmp(&b.to_ascii_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

impl PartialOrd for Qualifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Qualifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Qualifier {}

impl ModuleVersion {
    pub fn parse(version: &str) -> Result<Self, InvalidVersion> {
        let (base_text, qualifier) = match version.split_once('-') {
            Some((_, "")) => return Err(InvalidVersion::new(version, "empty qualifier")),
            Some((base, qualifier)) => (base, Some(Qualifier::classify(qualifier))),
            None => (version, None),
        };
        if base_text.is_empty() {
            return Err(InvalidVersion::new(version, "missing numeric base"));
        }

        let base = base_text
            .split('.')
            .map(|segment| parse_segment(version, segment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            original: version.to_string(),
            base,
            qualifier,
        })
    }

}

fn parse_segment(version: &str, segment: &str) -> Result<u64, InvalidVersion> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidVersion::new(
            version,
            format!("'{segment}' is not a numeric segment"),
        ));
    }
    segment
        .parse()
        .map_err(|_| InvalidVersion::new(version, format!("segment '{segment}' is too large")))
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for ModuleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.base.len().max(other.base.len());
        for i in 0..len {
            let a = self.base.get(i).copied().unwrap_or(0);
            let b = other.base.get(i).copied().unwrap_or(0);
            if a != b {
                return a.cmp(&b);
            }
        }
        match (&self.qualifier, &other.qualifier) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ModuleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ModuleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModuleVersion {}

/// Compare two version strings. Fails if either is malformed.
pub fn compare(v1: &str, v2: &str) -> Result<Ordering, InvalidVersion> {
    Ok(ModuleVersion::parse(v1)?.cmp(&ModuleVersion::parse(v2)?))
}

/// Reject a version that cannot be compared against `0`.
pub fn validate(version: &str) -> Result<(), InvalidVersion> {
    compare("0", version).map(|_| ())
}
