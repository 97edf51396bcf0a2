//! Resolved / unresolved bookkeeping, keyed by module id.

use std::collections::HashMap;

use omod_core::coordinate::ModuleId;

/// The winning version recorded for a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub module_id: ModuleId,
    pub namespace: String,
    pub version: String,
}

/// A module request that failed, with the rendered failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedEntry {
    pub module_id: ModuleId,
    pub namespace: String,
    pub version: String,
    pub reason: String,
}

/// Both maps are last-write-wins per module id.
#[derive(Debug, Default)]
pub struct ResolutionState {
    resolved: HashMap<ModuleId, ResolvedEntry>,
    unresolved: HashMap<ModuleId, UnresolvedEntry>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolved(&self, module: &ModuleId) -> Option<&ResolvedEntry> {
        self.resolved.get(module)
    }

    pub fn unresolved(&self, module: &ModuleId) -> Option<&UnresolvedEntry> {
        self.unresolved.get(module)
    }

    pub fn record_resolved(&mut self, entry: ResolvedEntry) {
        self.resolved.insert(entry.module_id.clone(), entry);
    }

    pub fn record_unresolved(&mut self, entry: UnresolvedEntry) {
        self.unresolved.insert(entry.module_id.clone(), entry);
    }

    /// Drop unresolved records for modules that ended up resolved.
    pub fn reconcile(&mut self) {
        let resolved = &self.resolved;
        self.unresolved.retain(|module, _| !resolved.contains_key(module));
    }

    pub fn resolved_entries(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.resolved.values()
    }

    pub fn unresolved_entries(&self) -> impl Iterator<Item = &UnresolvedEntry> {
        self.unresolved.values()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}
