//! The import cycle: load the catalog, parse new lines, merge, write back.
//!
//! The store is only rewritten once the merge has completed in memory, so a
//! failure before that point leaves the catalog as it was.

use biblioteca_core::{CatalogStore, Clock};

use crate::error::LineWarning;
use crate::merge::{merge, DuplicatePolicy};
use crate::parse::parse_lines;

/// Outcome of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records added to the catalog.
    pub added: usize,
    /// Incoming records dropped as duplicates.
    pub skipped: usize,
    /// Catalog size after the import.
    pub total: usize,
    /// One entry per rejected input line.
    pub warnings: Vec<LineWarning>,
}

/// Import `lines` into `store`.
///
/// Parse warnings are collected in the summary; only store errors fail the
/// import.
pub fn import<I, S>(
    store: &mut dyn CatalogStore,
    lines: I,
    policy: DuplicatePolicy,
    clock: &dyn Clock,
) -> biblioteca_core::Result<ImportSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let existing = store.load()?;
    log::info!("Catalog holds {} records before import", existing.len());

    let batch = parse_lines(lines, clock);
    let outcome = merge(existing, batch.records, policy, clock);

    store.replace_all(&outcome.records)?;

    Ok(ImportSummary {
        added: outcome.added,
        skipped: outcome.skipped,
        total: outcome.records.len(),
        warnings: batch.warnings,
    })
}
