//! Generate command implementation

use std::path::Path;

use anyhow::Result;
use namedex_testkit::data_gen::{SourceLayout, generate_names_file};
use tracing::info;

use crate::utils::format_size;

pub fn run(output: &Path, count: usize, seed: u64, blank_every: usize) -> Result<()> {
    if output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }
    let layout = SourceLayout {
        blank_line_every: blank_every,
        ..Default::default()
    };
    info!(path = %output.display(), count, seed, "generating names file");
    let counts = generate_names_file(output, count, seed, &layout)?;
    let letters = counts.iter().filter(|(_, n)| *n > 0).count();
    let size = std::fs::metadata(output)?.len();
    println!(
        "Wrote {count} names over {letters} letters to {} ({})",
        output.display(),
        format_size(size)
    );
    Ok(())
}
