//! Transitive module resolution: fetch a module artifact, read the modules its
//! `config.xml` requires, and expand the closure with higher-version-wins
//! bookkeeping of resolved and unresolved modules.

pub mod error;
pub mod manifest;
pub mod report;
pub mod resolver;
pub mod state;
pub mod version;
mod visited;
