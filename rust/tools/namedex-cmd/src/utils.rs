//! Common utilities for namedex-cmd

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use namedex_index::{IndexConfig, LetterIndex, NameDirectory};
use tracing::{debug, info};

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }
    Ok(())
}

/// Reads index settings from a JSON file, or returns the defaults.
pub fn load_index_config(path: Option<&Path>) -> Result<IndexConfig> {
    let Some(path) = path else {
        return Ok(IndexConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read index config {}", path.display()))?;
    let config: IndexConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid index config {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded index config");
    Ok(config)
}

/// Opens a directory over `path` and builds its index.
pub fn build_directory(
    path: &Path,
    config: IndexConfig,
) -> Result<(NameDirectory, Arc<LetterIndex>)> {
    validate_file_exists(path)?;
    info!(path = %path.display(), "indexing");
    let directory = NameDirectory::for_file(path, config);
    let index = directory
        .build()
        .with_context(|| format!("Failed to index {}", path.display()))?;
    debug!(
        records = index.total_records(),
        buckets = index.bucket_count(),
        "index ready"
    );
    Ok((directory, index))
}

/// Formats file size in human-readable format
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
