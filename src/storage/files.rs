//! Recursive text file discovery

use crate::utils::error::{EngineError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lazily yield every regular file below `root` whose name ends with `suffix`.
///
/// A missing or unreadable root fails up front. Entries that cannot be read
/// during the walk are logged and skipped.
pub fn walk_files(root: &Path, suffix: &str) -> Result<impl Iterator<Item = PathBuf>> {
    let metadata = std::fs::metadata(root)?;
    if !metadata.is_dir() {
        return Err(EngineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        )));
    }
    // Surface permission errors on the root itself instead of logging them.
    std::fs::read_dir(root)?;

    let suffix = suffix.to_string();
    let files = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| entry.file_name().to_string_lossy().ends_with(suffix.as_str()))
        .map(|entry| entry.into_path());

    Ok(files)
}
