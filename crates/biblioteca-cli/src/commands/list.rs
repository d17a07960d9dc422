use anyhow::{Context, Result};
use std::path::Path;

use biblioteca_core::{normalize, open_store, Record};

pub fn list_catalog(catalog_path: &Path, json: bool, genre: Option<String>) -> Result<()> {
    let store = open_store(catalog_path)
        .with_context(|| format!("Failed to open catalog {}", catalog_path.display()))?;

    let mut records = store.load()?;
    if let Some(genre) = genre {
        let wanted = normalize(&genre);
        records.retain(|r| normalize(r.genre()) == wanted);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No books in {}", catalog_path.display());
        return Ok(());
    }

    for record in &records {
        println!("{}", format_row(record));
    }
    println!("\n{} books", records.len());

    Ok(())
}

fn format_row(record: &Record) -> String {
    let year = record.year().map(|y| y.to_string()).unwrap_or_default();
    let volume = record.volume().map(|v| v.to_string()).unwrap_or_default();
    [
        record.genre(),
        record.last_name(),
        record.first_name(),
        record.title(),
        record.series(),
        record.publisher(),
        year.as_str(),
        volume.as_str(),
    ]
    .join("\t")
}
