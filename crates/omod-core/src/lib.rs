//! Core data types for omod.
//!
//! This crate defines the module coordinate model shared by the fetcher and
//! the resolver, plus the TOML-backed resolver configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Group id used by OpenMRS modules.
pub const GROUP_MODULE: &str = "org.openmrs.module";

/// Group id of OpenMRS core artifacts, used as a fallback namespace.
pub const GROUP_OPENMRS: &str = "org.openmrs";

pub mod config;
pub mod coordinate;
