//! Utility functions for string handling and output directory preparation.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Characters that are not allowed in result file names.
const UNSAFE_FILENAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a char boundary) with
/// `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Make an article title usable as a file name.
///
/// Each of `/ \ ? % * : | " < >` becomes `-`; everything else is kept.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// Empty `path` (creating it if needed) and check that it is writable.
///
/// Only the entries are removed; the directory itself (symlink, mode,
/// ownership) stays in place, so `.` works as a result folder.
///
/// # Errors
///
/// Returns an error if:
/// - An existing entry cannot be removed
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn reset_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;

    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(entry.path()).await?;
        } else {
            fs::remove_file(entry.path()).await?;
        }
    }

    // Try a small sync write using std fs (simpler error surface)
    let check_path = path.join("..__write_check__");
    stdfs::File::create(&check_path)?;
    let _ = stdfs::remove_file(&check_path);
    info!("Result directory emptied and writable");
    Ok(())
}
