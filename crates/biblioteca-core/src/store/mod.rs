//! Persisted catalog stores.
//!
//! A store holds the catalog as rows in the fixed [`Column`](crate::model::Column)
//! order. The import pipeline only ever needs two operations: read every
//! record, and replace every record with a freshly sorted sequence.

pub mod table;

use std::path::Path;

use crate::error::Result;
use crate::model::Record;
use crate::schema::Database;

pub use table::TableFile;

/// A catalog persisted somewhere.
pub trait CatalogStore: std::fmt::Debug {
    /// Read every stored record, in stored order.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replace every stored record with `records`.
    ///
    /// Implementations either write the whole sequence or leave the previous
    /// contents untouched.
    fn replace_all(&mut self, records: &[Record]) -> Result<()>;
}

/// Which backend a catalog path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Comma-separated table file with a header row.
    Table,
    /// SQLite database.
    Sqlite,
}

impl StoreKind {
    /// Pick a backend from the path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("db" | "sqlite" | "sqlite3") => Self::Sqlite,
            _ => Self::Table,
        }
    }
}

/// Open the catalog at `path`, creating an empty one if it does not exist.
pub fn open_store(path: &Path) -> Result<Box<dyn CatalogStore>> {
    let kind = StoreKind::from_path(path);
    log::debug!("Opening {:?} catalog at {}", kind, path.display());
    match kind {
        StoreKind::Table => Ok(Box::new(TableFile::create(path)?)),
        StoreKind::Sqlite => Ok(Box::new(Database::open(path)?)),
    }
}
