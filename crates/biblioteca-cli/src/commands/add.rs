use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use biblioteca_core::{open_store, SystemClock};
use biblioteca_etl::{import, DuplicatePolicy};

pub fn run_add(catalog_path: &Path, input: Option<PathBuf>, policy: DuplicatePolicy) -> Result<()> {
    let text = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            log::info!("Reading books from standard input");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            buffer
        }
    };

    let mut store = open_store(catalog_path)
        .with_context(|| format!("Failed to open catalog {}", catalog_path.display()))?;

    let summary = import(store.as_mut(), text.lines(), policy, &SystemClock)
        .with_context(|| format!("Failed to update catalog {}", catalog_path.display()))?;

    for warning in &summary.warnings {
        eprintln!("warning: {warning}  -> skipped");
    }

    println!(
        "Done. Added: {}. Duplicates skipped: {}. File: {}",
        summary.added,
        summary.skipped,
        catalog_path.display()
    );

    Ok(())
}
