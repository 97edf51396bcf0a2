//! Tabular rendering of a finished resolution.

use std::fmt;

use crate::state::{ResolutionState, ResolvedEntry, UnresolvedEntry};

const MODULE_WIDTH: usize = 30;
const GROUP_WIDTH: usize = 25;
const RULE_WIDTH: usize = 88;

/// One row of the report: module id, group id, version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub module_id: String,
    pub namespace: String,
    pub version: String,
}

impl From<&ResolvedEntry> for ReportRow {
    fn from(entry: &ResolvedEntry) -> Self {
        Self {
            module_id: entry.module_id.to_string(),
            namespace: entry.namespace.clone(),
            version: entry.version.clone(),
        }
    }
}

impl From<&UnresolvedEntry> for ReportRow {
    fn from(entry: &UnresolvedEntry) -> Self {
        Self {
            module_id: entry.module_id.to_string(),
            namespace: entry.namespace.clone(),
            version: entry.version.clone(),
        }
    }
}

/// Snapshot of the resolved and unresolved sets, each sorted by module id.
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    pub resolved: Vec<ReportRow>,
    pub unresolved: Vec<ReportRow>,
}

impl ResolutionReport {
    pub fn from_state(state: &ResolutionState) -> Self {
        let mut resolved: Vec<ReportRow> = state.resolved_entries().map(ReportRow::from).collect();
        let mut unresolved: Vec<ReportRow> =
            state.unresolved_entries().map(ReportRow::from).collect();
        resolved.sort_by(|a, b| a.module_id.cmp(&b.module_id));
        unresolved.sort_by(|a, b| a.module_id.cmp(&b.module_id));
        Self {
            resolved,
            unresolved,
        }
    }

    /// Whether every requested module was resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, title: &str, rows: &[ReportRow]) -> fmt::Result {
    writeln!(f, "{:=^RULE_WIDTH$}", format!(" {title} "))?;
    writeln!(
        f,
        "{:<MODULE_WIDTH$} | {:<GROUP_WIDTH$} | Version",
        "Module ID", "Group ID"
    )?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
    if rows.is_empty() {
        writeln!(f, "(none)")?;
    }
    for row in rows {
        writeln!(
            f,
            "{:<MODULE_WIDTH$} | {:<GROUP_WIDTH$} | {}",
            row.module_id, row.namespace, row.version
        )?;
    }
    Ok(())
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, "Resolved Modules", &self.resolved)?;
        writeln!(f)?;
        write_table(f, "Unresolved Modules", &self.unresolved)
    }
}
