use anyhow::{Context, Result};
use std::path::Path;

use biblioteca_core::open_store;

pub fn init_catalog(catalog_path: &Path) -> Result<()> {
    let existed = catalog_path.exists();

    open_store(catalog_path)
        .with_context(|| format!("Failed to create catalog {}", catalog_path.display()))?;

    if existed {
        println!("Catalog already exists: {}", catalog_path.display());
    } else {
        println!("✓ Created catalog: {}", catalog_path.display());
    }

    Ok(())
}
