//! Line parser: one delimited text line in, one [`Record`] out.
//!
//! Expected layout, with any supported delimiter:
//!
//! ```text
//! Surname;Name;Title;Series;Publisher;Year;Genre
//! Omero;—;Iliade;Classici Greci;Einaudi;1990;Letteratura greca
//! ```
//!
//! Blank lines and `#` comments are skipped. Lines with more than seven
//! fields keep the first two and the last four positional and glue the rest
//! back together as the title, on the assumption that the extra delimiters
//! were part of the title.

use biblioteca_core::{extract_volume, extract_year, Clock, Record};

use crate::delimiter::Delimiter;
use crate::error::{LineWarning, ParseError};

/// Number of fields in a well-formed line.
pub const FIELD_COUNT: usize = 7;

/// Field names of a well-formed line, in order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "Surname",
    "Name",
    "Title",
    "Series",
    "Publisher",
    "Year",
    "Genre",
];

/// The seven text fields of one input line, before any extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub surname: String,
    pub name: String,
    pub title: String,
    pub series: String,
    pub publisher: String,
    pub year: String,
    pub genre: String,
}

impl RawRow {
    /// Split a non-blank line into its seven fields.
    pub fn split(line: &str) -> Result<Self, ParseError> {
        let delimiter = Delimiter::detect(line);
        let fields = split_fields(line, delimiter);

        let too_few = || ParseError::FieldCount {
            found: fields.len(),
            line: line.to_string(),
            expected: expected_layout(delimiter),
        };
        if fields.len() < FIELD_COUNT {
            return Err(too_few());
        }
        let [surname, name, middle @ .., series, publisher, year, genre] = fields.as_slice() else {
            return Err(too_few());
        };

        if middle.len() > 1 {
            log::debug!(
                "{} fields in {line:?}; joining {} middle fields into the title",
                fields.len(),
                middle.len()
            );
        }

        Ok(Self {
            surname: surname.clone(),
            name: name.clone(),
            title: middle.join(&delimiter.to_string()).trim().to_string(),
            series: series.clone(),
            publisher: publisher.clone(),
            year: year.clone(),
            genre: genre.clone(),
        })
    }

    /// Build the record, extracting year and volume and stamping both
    /// timestamps with `now`.
    ///
    /// The volume comes from the title, or from the series when the title
    /// has none or names volume 0.
    pub fn into_record(self, now: &str) -> Record {
        let volume = extract_volume(&self.title)
            .filter(|v| *v != 0)
            .or_else(|| extract_volume(&self.series));
        let year = extract_year(&self.year);
        Record::new(self.genre, self.surname, self.name, self.title)
            .with_series(self.series)
            .with_publisher(self.publisher)
            .with_year(year)
            .with_volume(volume)
            .stamped(now, now)
    }
}

/// Parse one raw line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(raw: &str, now: &str) -> Result<Option<Record>, ParseError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    RawRow::split(line).map(|row| Some(row.into_record(now)))
}

/// Records parsed from a batch of lines, plus one warning per rejected line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBatch {
    pub records: Vec<Record>,
    pub warnings: Vec<LineWarning>,
}

/// Parse a batch of lines, all stamped with the same instant from `clock`.
///
/// Rejected lines become warnings and never stop the batch.
pub fn parse_lines<I, S>(lines: I, clock: &dyn Clock) -> ParsedBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let now = clock.timestamp();
    let mut batch = ParsedBatch::default();

    for (index, raw) in lines.into_iter().enumerate() {
        match parse_line(raw.as_ref(), &now) {
            Ok(Some(record)) => batch.records.push(record),
            Ok(None) => {}
            Err(error) => {
                let warning = LineWarning {
                    line_number: index + 1,
                    error,
                };
                log::warn!("Skipping {warning}");
                batch.warnings.push(warning);
            }
        }
    }

    log::info!(
        "Parsed {} records ({} lines rejected)",
        batch.records.len(),
        batch.warnings.len()
    );
    batch
}

fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Comma => split_quoted(line, delimiter.as_char()),
        _ => line
            .split(delimiter.as_char())
            .map(|field| field.trim().to_string())
            .collect(),
    }
}

/// Split on `delimiter`, honouring double-quoted fields.
///
/// Inside quotes the delimiter is literal and `""` is an escaped quote.
/// Spaces right after a delimiter are skipped, so `a, "b, c"` yields
/// `["a", "b, c"]`.
fn split_quoted(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c != '"' {
                field.push(c);
            } else if chars.peek() == Some(&'"') {
                chars.next();
                field.push('"');
            } else {
                in_quotes = false;
            }
            continue;
        }

        if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
            continue;
        }
        if at_field_start && c == ' ' {
            continue;
        }
        if at_field_start && c == '"' {
            in_quotes = true;
        } else {
            field.push(c);
        }
        at_field_start = false;
    }

    fields.push(field);
    fields
}

fn expected_layout(delimiter: Delimiter) -> String {
    FIELD_NAMES.join(&delimiter.to_string())
}
