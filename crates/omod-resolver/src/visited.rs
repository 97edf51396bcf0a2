//! Tracks which module requests were fetched and expanded during one
//! resolution run so repeated requests cannot loop.

use std::collections::HashSet;

use omod_core::coordinate::ModuleId;

#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<(ModuleId, String)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, module: &ModuleId, version: &str) {
        self.visited.insert((module.clone(), version.to_string()));
    }

    pub fn contains(&self, module: &ModuleId, version: &str) -> bool {
        self.visited.contains(&(module.clone(), version.to_string()))
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }
}
