//! Page command implementation

use std::path::Path;

use anyhow::{Context, Result};
use namedex_index::IndexConfig;

use crate::utils::build_directory;

pub fn run(file: &Path, config: IndexConfig, letter: &str, offset: i64, limit: i64) -> Result<()> {
    let (directory, _index) = build_directory(file, config)?;
    let letter = letter.trim().to_uppercase();
    let page = directory
        .get_page(&letter, offset, limit)
        .with_context(|| format!("Failed to read page of letter {letter}"))?;

    for record in &page.records {
        println!("{record}");
    }
    eprintln!(
        "{} record(s) of {} for letter {} starting at {}{}",
        page.records.len(),
        page.total,
        letter,
        offset,
        if page.has_more { ", more available" } else { "" }
    );
    Ok(())
}
