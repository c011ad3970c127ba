//! Index command implementation

use std::path::Path;

use anyhow::Result;
use namedex_index::{BuildStats, IndexConfig, LetterBucket};
use serde::Serialize;

use crate::utils::{build_directory, format_size};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexSummary<'a> {
    source: String,
    total_records: u64,
    buckets: Vec<LetterBucket>,
    stats: &'a BuildStats,
}

pub fn run(file: &Path, config: IndexConfig, json: bool) -> Result<()> {
    let (_directory, index) = build_directory(file, config)?;
    let summary = IndexSummary {
        source: file.display().to_string(),
        total_records: index.total_records(),
        buckets: index.buckets().copied().collect(),
        stats: index.stats(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Source: {}", summary.source);
    println!(
        "Records: {} ({} scanned)",
        summary.total_records,
        format_size(summary.stats.bytes_scanned)
    );
    println!(
        "Lines: {} scanned, {} blank, {} without a letter",
        summary.stats.lines_scanned, summary.stats.blank_lines, summary.stats.invalid_lines
    );
    if summary.stats.overwritten_buckets > 0 {
        println!(
            "Warning: {} letter group(s) were not contiguous; later groups replaced earlier ones",
            summary.stats.overwritten_buckets
        );
    }
    println!("Elapsed: {:?}", summary.stats.elapsed);
    println!();
    println!("{:<6} {:>12} {:>12} {:>14}", "Letter", "Start", "Count", "Byte offset");
    for bucket in &summary.buckets {
        println!(
            "{:<6} {:>12} {:>12} {:>14}",
            bucket.letter, bucket.start_offset, bucket.count, bucket.byte_offset
        );
    }
    Ok(())
}
