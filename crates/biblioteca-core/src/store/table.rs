//! Comma-separated table file backend.
//!
//! The file starts with the header row from [`Column::headers`] followed by
//! one row per record. Unknown year and volume are written as empty cells.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::model::{Column, Record};
use crate::store::CatalogStore;

/// A catalog kept in a delimited table file.
#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
}

impl TableFile {
    /// Use an existing table file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(crate::Error::InvalidData(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    /// Open the table file at `path`, writing a header-only file first if it
    /// does not exist yet.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut table = Self { path };
        if !table.path.exists() {
            if let Some(parent) = table.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            log::info!("Creating catalog table {}", table.path.display());
            table.replace_all(&[])?;
        }
        Ok(table)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a new table through `fill` into a temporary file next to the
    /// catalog, then rename it over the catalog.
    ///
    /// If `fill`, the flush or the rename fails, the temporary file is removed
    /// and the catalog is left as it was.
    fn write_with<F>(&self, fill: F) -> Result<()>
    where
        F: FnOnce(&mut csv::Writer<&File>) -> Result<()>,
    {
        let staging = NamedTempFile::new_in(self.directory())?;
        {
            let mut writer = csv::Writer::from_writer(staging.as_file());
            fill(&mut writer)?;
            writer.flush()?;
        }
        staging.as_file().sync_all()?;
        staging.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl CatalogStore for TableFile {
    fn load(&self) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?;
        if !headers.iter().map(str::trim).eq(Column::headers()) {
            log::warn!(
                "Unexpected header row in {}; reading columns by position",
                self.path.display()
            );
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cells: Vec<&str> = row.iter().collect();
            records.push(Record::from_row(&cells));
        }

        log::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn replace_all(&mut self, records: &[Record]) -> Result<()> {
        self.write_with(|writer| {
            writer.write_record(Column::headers())?;
            for record in records {
                writer.write_record(record.to_row())?;
            }
            Ok(())
        })?;

        log::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Letteratura greca", "Omero", "—", "Iliade")
                .with_series("Classici Greci")
                .with_publisher("Einaudi")
                .with_year(Some(1990))
                .stamped("2024-01-01 10:00:00", "2024-01-01 10:00:00"),
            Record::new("Narrativa", "Tolkien", "J.R.R.", "Il Signore degli Anelli, Volume II")
                .with_series("Fantasy")
                .with_publisher("Bompiani")
                .with_year(Some(1970))
                .with_volume(Some(2))
                .with_note("copertina \"rigida\"")
                .stamped("2024-01-01 10:00:00", "2024-02-01 10:00:00"),
        ]
    }

    #[test]
    fn test_create_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("biblioteca.csv");

        let table = TableFile::create(&path).unwrap();
        assert!(table.load().unwrap().is_empty());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "Genre,Surname,Name,Title,Series,Publisher,Year,Volume,Note,Created,Updated"
        );
    }

    #[test]
    fn test_create_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        TableFile::create(&path).unwrap().replace_all(&sample()).unwrap();

        let table = TableFile::create(&path).unwrap();
        assert_eq!(table.load().unwrap().len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_order_and_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        let mut table = TableFile::create(&path).unwrap();

        table.replace_all(&sample()).unwrap();
        let loaded = table.load().unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded[0].volume(), None);

        let contents = std::fs::read_to_string(&path).unwrap();
        let omero = contents.lines().nth(1).unwrap();
        assert!(omero.contains(",1990,,,"), "row was {omero}");
    }

    #[test]
    fn test_load_skips_blank_rows_and_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        std::fs::write(
            &path,
            "Genre,Surname,Name,Title,Series,Publisher,Year,Volume,Note,Created,Updated\n\
             ,,,,,,,,,,\n\
             Narrativa,Eco,Umberto,Il pendolo di Foucault,,Bompiani,1988\n",
        )
        .unwrap();

        let records = TableFile::open(&path).unwrap().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_name(), "Eco");
        assert_eq!(records[0].year(), Some(1988));
        assert_eq!(records[0].created_at(), "");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(TableFile::open(dir.path().join("missing.csv")).is_err());
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), "x").unwrap();

        let mut table = TableFile { path: path.clone() };
        let result = table.replace_all(&sample());

        assert!(result.is_err());
        assert_eq!(entries(dir.path()), vec!["biblioteca.csv"]);
        assert!(path.is_dir());
    }

    #[test]
    fn test_failed_write_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        let mut table = TableFile::create(&path).unwrap();
        table.replace_all(&sample()).unwrap();
        let before = std::fs::read(&path).unwrap();

        let result = table.write_with(|writer| {
            writer.write_record(Column::headers())?;
            writer.write_record(sample()[0].to_row())?;
            Err(crate::Error::InvalidData("interrupted".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(entries(dir.path()), vec!["biblioteca.csv"]);
        assert_eq!(table.load().unwrap(), sample());
    }

    #[test]
    fn test_replace_all_shrinks_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("biblioteca.csv");
        let mut table = TableFile::create(&path).unwrap();

        table.replace_all(&sample()).unwrap();
        table.replace_all(&sample()[..1]).unwrap();
        assert_eq!(table.load().unwrap().len(), 1);
    }
}
