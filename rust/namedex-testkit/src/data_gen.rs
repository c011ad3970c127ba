//! Data generation utilities for testing.
//!
//! Generates synthetic name lists grouped by leading letter, in the layout the
//! index expects (all names of a letter contiguous, letters in alphabetical
//! order), and renders them as newline-delimited sources with optional noise.

use std::path::{Path, PathBuf};

use namedex_io::{FileWriter, SealingWrite};

const SYLLABLES: &[&str] = &[
    "an", "bel", "car", "da", "el", "fa", "gor", "ha", "is", "jo", "ka", "li", "mo", "na", "or",
    "pe", "qui", "ra", "si", "to", "ul", "va", "wen", "xa", "yo", "ze",
];

const SURNAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Martin",
    "Lopez", "Wilson", "Moore", "Taylor", "Thomas", "White", "Harris", "Clark", "Lewis",
];

/// Generates names grouped by leading letter.
///
/// `counts` lists `(letter, count)` pairs; the groups are emitted in the given
/// order, each group sorted. Generation is deterministic for a given `seed`.
pub fn generate_names(counts: &[(char, usize)], seed: u64) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut names = Vec::with_capacity(counts.iter().map(|(_, n)| n).sum());
    for &(letter, count) in counts {
        let mut group = (0..count)
            .map(|_| {
                let mut first = String::new();
                first.push(letter.to_ascii_uppercase());
                for _ in 0..rng.usize(1..=3) {
                    first.push_str(SYLLABLES[rng.usize(..SYLLABLES.len())]);
                }
                format!("{first} {}", SURNAMES[rng.usize(..SURNAMES.len())])
            })
            .collect::<Vec<_>>();
        group.sort();
        names.extend(group);
    }
    names
}

/// Splits `total` names over the 26 letters with random weights.
/// Some letters may end up empty.
pub fn random_letter_counts(total: usize, seed: u64) -> Vec<(char, usize)> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let weights = (0..26)
        .map(|_| if rng.u8(..10) == 0 { 0 } else { rng.usize(1..=100) })
        .collect::<Vec<_>>();
    let weight_sum = weights.iter().sum::<usize>().max(1);

    let mut counts = Vec::with_capacity(26);
    let mut assigned = 0;
    for (i, weight) in weights.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let count = total * weight / weight_sum;
        assigned += count;
        counts.push((letter, count));
    }
    // Rounding leftovers go to the last non-empty letter.
    if let Some(entry) = counts.iter_mut().rev().find(|(_, n)| *n > 0) {
        entry.1 += total - assigned;
    } else if let Some(entry) = counts.first_mut() {
        entry.1 = total;
    }
    counts
}

/// How names are laid out in a rendered source.
#[derive(Debug, Clone, Default)]
pub struct SourceLayout {
    /// Insert a blank (or whitespace-only) line after every N names. Zero disables.
    pub blank_line_every: usize,
    /// Insert a line starting with a digit after every N names. Zero disables.
    pub invalid_line_every: usize,
    /// Terminate lines with `\r\n` instead of `\n`.
    pub crlf: bool,
    /// Terminate lines with a lone `\r` instead of `\n`. Ignored when `crlf` is set.
    pub cr: bool,
    /// Lowercase every N-th name and pad it with surrounding spaces. Zero disables.
    pub untidy_every: usize,
}

/// Writes `names` to `writer` according to `layout` and seals the writer.
pub fn write_source<W: SealingWrite>(
    writer: &mut W,
    names: &[String],
    layout: &SourceLayout,
) -> std::io::Result<()> {
    let eol: &[u8] = match (layout.crlf, layout.cr) {
        (true, _) => b"\r\n",
        (false, true) => b"\r",
        (false, false) => b"\n",
    };
    let every = |n: usize, i: usize| n != 0 && (i + 1) % n == 0;

    for (i, name) in names.iter().enumerate() {
        if every(layout.untidy_every, i) {
            writer.write_all(format!("  {}\t", name.to_lowercase()).as_bytes())?;
        } else {
            writer.write_all(name.as_bytes())?;
        }
        writer.write_all(eol)?;

        if every(layout.blank_line_every, i) {
            let padding: &[u8] = if i % 2 == 0 { b"" } else { b"   " };
            writer.write_all(padding)?;
            writer.write_all(eol)?;
        }
        if every(layout.invalid_line_every, i) {
            writer.write_all(format!("{} unnamed", i % 10).as_bytes())?;
            writer.write_all(eol)?;
        }
    }
    writer.seal()
}

/// Renders `names` into an in-memory buffer.
pub fn render_source(names: &[String], layout: &SourceLayout) -> Vec<u8> {
    let mut buf = Vec::new();
    write_source(&mut buf, names, layout).expect("in-memory write");
    buf
}

/// A names file in a temporary directory, removed on drop.
pub struct NamesFile {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl NamesFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `names` to a fresh temporary file.
pub fn write_names_file(names: &[String], layout: &SourceLayout) -> anyhow::Result<NamesFile> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("names.txt");
    let mut writer = FileWriter::create(&path)?;
    write_source(&mut writer, names, layout)?;
    Ok(NamesFile { _dir: dir, path })
}

/// Generates `total` names spread over random letters and writes them to
/// `path`, which must not exist yet. Returns the per-letter counts.
pub fn generate_names_file(
    path: &Path,
    total: usize,
    seed: u64,
    layout: &SourceLayout,
) -> anyhow::Result<Vec<(char, usize)>> {
    let counts = random_letter_counts(total, seed);
    let names = generate_names(&counts, seed);
    let mut writer = FileWriter::create(path)?;
    write_source(&mut writer, &names, layout)?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::{SourceLayout, generate_names, random_letter_counts, render_source};

    #[test]
    fn test_generate_names() {
        let names = generate_names(&[('a', 2), ('B', 3)], 7);
        assert_eq!(names.len(), 5);
        assert!(names[..2].iter().all(|n| n.starts_with('A')));
        assert!(names[2..].iter().all(|n| n.starts_with('B')));
        assert_eq!(names, generate_names(&[('a', 2), ('B', 3)], 7));
    }

    #[test]
    fn test_random_letter_counts() {
        for seed in 0..20 {
            let counts = random_letter_counts(1000, seed);
            assert_eq!(counts.len(), 26);
            assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 1000);
        }
    }

    #[test]
    fn test_render_source() {
        let names = vec!["Alice".to_string(), "Bob".to_string()];
        let layout = SourceLayout {
            blank_line_every: 1,
            crlf: true,
            ..Default::default()
        };
        assert_eq!(render_source(&names, &layout), b"Alice\r\n\r\nBob\r\n   \r\n");

        let layout = SourceLayout {
            invalid_line_every: 2,
            untidy_every: 2,
            ..Default::default()
        };
        assert_eq!(
            render_source(&names, &layout),
            b"Alice\n  bob\t\n1 unnamed\n"
        );

        let layout = SourceLayout {
            cr: true,
            ..Default::default()
        };
        assert_eq!(render_source(&names, &layout), b"Alice\rBob\r");
    }
}
