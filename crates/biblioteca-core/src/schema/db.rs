use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;
use crate::model::Record;
use crate::store::CatalogStore;

use super::migrations::MIGRATIONS;

const SELECT_BOOKS: &str = "SELECT genre, surname, name, title, series, publisher, year, volume,
        note, created_at, updated_at
    FROM books ORDER BY position";

const INSERT_BOOK: &str = "INSERT INTO books (
        position, genre, surname, name, title, series, publisher, year, volume,
        note, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

/// A catalog kept in an SQLite database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Number of stored records.
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let genre: String = row.get(0)?;
        let surname: String = row.get(1)?;
        let name: String = row.get(2)?;
        let title: String = row.get(3)?;
        let created_at: String = row.get(9)?;
        let updated_at: String = row.get(10)?;

        Ok(Record::new(genre, surname, name, title)
            .with_series(row.get::<_, String>(4)?)
            .with_publisher(row.get::<_, String>(5)?)
            .with_year(row.get(6)?)
            .with_volume(row.get(7)?)
            .with_note(row.get::<_, String>(8)?)
            .stamped(created_at, updated_at))
    }
}

impl CatalogStore for Database {
    fn load(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(SELECT_BOOKS)?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        log::debug!("Loaded {} records from database", records.len());
        Ok(records)
    }

    fn replace_all(&mut self, records: &[Record]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM books", [])?;
        {
            let mut insert = tx.prepare(INSERT_BOOK)?;
            for (position, record) in records.iter().enumerate() {
                insert.execute(rusqlite::params![
                    i64::try_from(position).unwrap_or(i64::MAX),
                    record.genre(),
                    record.last_name(),
                    record.first_name(),
                    record.title(),
                    record.series(),
                    record.publisher(),
                    record.year(),
                    record.volume(),
                    record.note(),
                    record.created_at(),
                    record.updated_at(),
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("Wrote {} records to database", records.len());
        Ok(())
    }
}
