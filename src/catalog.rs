use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::pipeline::extractor::ExtractedFields;
use crate::pipeline::listing::ListingRecord;

/// One product's merged extracted-and-platform-mapped field record.
/// Flat string keys so the row can round-trip through a spreadsheet codec.
pub type CatalogRow = BTreeMap<String, String>;

/// Merge raw extracted fields and the per-marketplace listing blocks into
/// one catalog row (key union)
pub fn merge_row(fields: &ExtractedFields, listings: &[ListingRecord]) -> CatalogRow {
    let mut row = CatalogRow::new();
    for (key, value) in fields.iter() {
        row.insert(key.as_str().to_string(), value.to_string());
    }
    for listing in listings {
        for (key, value) in listing {
            row.insert(key.clone(), value.clone());
        }
    }
    row
}

/// Append a row to a copy of the catalog. The original list is untouched;
/// rows are never mutated after they are added.
pub fn append_row(catalog: &[CatalogRow], row: CatalogRow) -> Vec<CatalogRow> {
    let mut updated = catalog.to_vec();
    updated.push(row);
    updated
}

/// Load a catalog from a JSON file. A missing file is an empty catalog.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let rows: Vec<CatalogRow> = serde_json::from_str(&content)?;
    info!("Loaded catalog rows={} from {}", rows.len(), path.display());
    Ok(rows)
}

/// Save a catalog to a JSON file
pub fn save_catalog<P: AsRef<Path>>(path: P, rows: &[CatalogRow]) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(rows)?;
    fs::write(path, content)?;
    info!("Saved catalog rows={} to {}", rows.len(), path.display());
    Ok(())
}
