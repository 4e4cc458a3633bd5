//! Markdown page discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collect every `.md` file under `source_dir`.
///
/// Returned paths are relative to `source_dir` and sorted, so builds visit
/// pages in a stable order. Hidden files and directories (names starting
/// with `.`) are skipped.
pub(crate) fn scan_pages(source_dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let mut pages = Vec::new();
    walk_dir(source_dir, source_dir, &mut pages)?;
    pages.sort();
    Ok(pages)
}

fn walk_dir(base: &Path, current: &Path, pages: &mut Vec<PathBuf>) -> Result<(), io::Error> {
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk_dir(base, &path, pages)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            if let Ok(relative) = path.strip_prefix(base) {
                pages.push(relative.to_path_buf());
            }
        }
    }
    Ok(())
}
