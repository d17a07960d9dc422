use serde::Serialize;

use crate::model::column::Column;
use crate::normalize::{extract_year, first_number, normalize};

/// Placeholder that sorts unknown years and volumes after every known value.
pub const UNKNOWN_SORTS_LAST: u32 = u32::MAX;

/// One catalog entry.
///
/// Every string is trimmed on the way in. A record is never edited in place:
/// builders consume `self` and return the new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    genre: String,
    last_name: String,
    first_name: String,
    title: String,
    series: String,
    publisher: String,
    year: Option<u16>,
    volume: Option<u32>,
    note: String,
    created_at: String,
    updated_at: String,
}

/// Identity of a record for duplicate detection.
///
/// Text fields are normalized; year and volume are compared as-is. Series and
/// note do not take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub genre: String,
    pub last_name: String,
    pub first_name: String,
    pub title: String,
    pub publisher: String,
    pub year: Option<u16>,
    pub volume: Option<u32>,
}

/// Position of a record in the catalog order.
///
/// Field order is the comparison order: genre, surname, given name, year,
/// volume, title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub genre: String,
    pub last_name: String,
    pub first_name: String,
    pub year: u32,
    pub volume: u32,
    pub title: String,
}

impl Record {
    #[must_use]
    pub fn new(
        genre: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            genre: trimmed(genre),
            last_name: trimmed(last_name),
            first_name: trimmed(first_name),
            title: trimmed(title),
            series: String::new(),
            publisher: String::new(),
            year: None,
            volume: None,
            note: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = trimmed(series);
        self
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = trimmed(publisher);
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: Option<u32>) -> Self {
        self.volume = volume;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = trimmed(note);
        self
    }

    /// Replace both timestamps.
    #[must_use]
    pub fn stamped(mut self, created_at: impl Into<String>, updated_at: impl Into<String>) -> Self {
        self.created_at = trimmed(created_at);
        self.updated_at = trimmed(updated_at);
        self
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn volume(&self) -> Option<u32> {
        self.volume
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    /// The duplicate-detection identity of this record.
    pub fn key(&self) -> DedupKey {
        DedupKey {
            genre: normalize(&self.genre),
            last_name: normalize(&self.last_name),
            first_name: normalize(&self.first_name),
            title: normalize(&self.title),
            publisher: normalize(&self.publisher),
            year: self.year,
            volume: self.volume,
        }
    }

    /// The catalog ordering key of this record.
    pub fn sort_key(&self) -> SortKey {
        SortKey {
            genre: normalize(&self.genre),
            last_name: normalize(&self.last_name),
            first_name: normalize(&self.first_name),
            year: self.year.map_or(UNKNOWN_SORTS_LAST, u32::from),
            volume: self.volume.unwrap_or(UNKNOWN_SORTS_LAST),
            title: normalize(&self.title),
        }
    }

    /// Build a record from one stored row laid out in [`Column::ALL`] order.
    ///
    /// Missing trailing cells read as empty. Year and volume cells that hold
    /// no digits load as unknown.
    pub fn from_row<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |column: Column| {
            cells
                .get(column.index())
                .map(|c| c.as_ref().trim())
                .unwrap_or_default()
        };
        Self::new(
            cell(Column::Genre),
            cell(Column::Surname),
            cell(Column::Name),
            cell(Column::Title),
        )
        .with_series(cell(Column::Series))
        .with_publisher(cell(Column::Publisher))
        .with_year(extract_year(cell(Column::Year)))
        .with_volume(first_number(cell(Column::Volume)))
        .with_note(cell(Column::Note))
        .stamped(cell(Column::Created), cell(Column::Updated))
    }

    /// Lay the record out as one stored row in [`Column::ALL`] order.
    ///
    /// Unknown year and volume become empty cells.
    pub fn to_row(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| match column {
                Column::Genre => self.genre.clone(),
                Column::Surname => self.last_name.clone(),
                Column::Name => self.first_name.clone(),
                Column::Title => self.title.clone(),
                Column::Series => self.series.clone(),
                Column::Publisher => self.publisher.clone(),
                Column::Year => self.year.map(|y| y.to_string()).unwrap_or_default(),
                Column::Volume => self.volume.map(|v| v.to_string()).unwrap_or_default(),
                Column::Note => self.note.clone(),
                Column::Created => self.created_at.clone(),
                Column::Updated => self.updated_at.clone(),
            })
            .collect()
    }
}

fn trimmed(s: impl Into<String>) -> String {
    s.into().trim().to_string()
}
