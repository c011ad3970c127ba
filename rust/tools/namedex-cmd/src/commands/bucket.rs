//! Bucket command implementation

use std::path::Path;

use anyhow::Result;
use namedex_index::{IndexConfig, Letter};

use crate::utils::build_directory;

pub fn run(file: &Path, config: IndexConfig, letter: &str) -> Result<()> {
    let letter = Letter::parse(&letter.trim().to_uppercase())?;
    let (directory, _index) = build_directory(file, config)?;
    match directory.bucket_info(letter)? {
        Some(bucket) => println!("{}", serde_json::to_string_pretty(&bucket)?),
        None => anyhow::bail!("No records for letter {letter}"),
    }
    Ok(())
}
