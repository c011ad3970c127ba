//! Letters command implementation

use std::path::Path;

use anyhow::Result;
use namedex_index::IndexConfig;

use crate::utils::build_directory;

pub fn run(file: &Path, config: IndexConfig) -> Result<()> {
    let (_directory, index) = build_directory(file, config)?;
    for stat in index.list_buckets() {
        println!("{} {}", stat.letter, stat.count);
    }
    Ok(())
}
