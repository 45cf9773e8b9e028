//! Page serialization to the output tree.
//!
//! Writes go to a temporary file in the target's directory which is then
//! renamed over the destination, so no output file is ever observed
//! half-written — regardless of how many writer tasks run concurrently.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::assemble::AssembledPage;

/// Error returned when a page cannot be written.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct WriteError {
    /// Target path of the failed write.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Write an assembled page to its target path.
///
/// Creates missing parent directories and overwrites an existing file at the
/// target path unconditionally.
///
/// # Errors
///
/// Returns [`WriteError`] if directories cannot be created or the write or
/// rename fails.
pub fn write_page(page: &AssembledPage) -> Result<(), WriteError> {
    write_file(&page.target, page.html.as_bytes())
}

/// Write bytes to a path atomically (temp file + rename).
fn write_file(target: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let wrap = |source: std::io::Error| WriteError {
        path: target.to_path_buf(),
        source,
    };

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(wrap)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(wrap)?;
    tmp.write_all(bytes).map_err(wrap)?;
    tmp.persist(target).map_err(|e| wrap(e.error))?;
    Ok(())
}
