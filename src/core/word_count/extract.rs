//! Word extraction from text files

use super::aggregator::{FrequencyTable, position};
use crate::core::batch::FileUnit;
use crate::utils::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, warn};

// Letters only, bounded by non-word characters: `abc_def` and `hello2` are not words.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\p{L}+\b").expect("word pattern is valid"));

/// Lower-cased letter-only words of `line` longer than `min_length` chars.
///
/// The length is measured after lower-casing.
pub fn extract_words(line: &str, min_length: usize) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(line)
        .map(|m| m.as_str().to_lowercase())
        .filter(move |word| word.chars().count() > min_length)
}

/// What one file contributed to a job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines: u64,
    pub skipped_lines: u64,
    pub words: u64,
}

/// Stream `unit` line by line into `table`.
///
/// Lines that are not valid UTF-8 are logged and skipped; the rest of the
/// file is still counted.
pub fn count_file(unit: &FileUnit, min_length: usize, table: &FrequencyTable) -> Result<FileStats> {
    let mut reader = BufReader::new(File::open(&unit.path)?);
    let mut buf = Vec::new();
    let mut stats = FileStats::default();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    file = %unit.path.display(),
                    line = stats.lines,
                    error = %e,
                    "skipping line that is not valid UTF-8"
                );
                stats.skipped_lines += 1;
                continue;
            }
        };

        for word in extract_words(line, min_length) {
            table.increment_seen_at(&word, position(unit.index, stats.words));
            stats.words += 1;
        }
    }

    debug!(file = %unit.path.display(), lines = stats.lines, words = stats.words, "file counted");
    Ok(stats)
}
