//! Plain-text transcript files.
//!
//! Each [`ArticleRecord`] becomes `{result_folder}/{sanitized title}.txt`:
//!
//! ```text
//! - Host
//! Welcome back to the show.
//!
//! - Guest
//! Thanks for having me.
//! ```

use crate::models::ArticleRecord;
use crate::utils::sanitize_filename;
use itertools::Itertools;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render the body of a transcript file.
///
/// Every line is `- {author}\n{citation}\n\n`; the joined body is trimmed so
/// the file carries no trailing blank lines.
pub fn render_transcript(record: &ArticleRecord) -> String {
    record
        .lines
        .iter()
        .map(|line| format!("- {}\n{}\n\n", line.author, line.citation))
        .join("")
        .trim()
        .to_string()
}

/// Path of the file that `record` is written to.
pub fn transcript_path(result_folder: &Path, record: &ArticleRecord) -> PathBuf {
    result_folder.join(format!("{}.txt", sanitize_filename(&record.title)))
}

/// Write one file per record, in record order.
///
/// Records with the same sanitized title overwrite each other, last one wins.
///
/// # Returns
///
/// The paths written, in the same order as `records`.
#[instrument(level = "info", skip_all, fields(result_folder = %result_folder.display(), count = records.len()))]
pub async fn write_transcripts(
    records: &[ArticleRecord],
    result_folder: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::with_capacity(records.len());
    for record in records {
        let path = transcript_path(result_folder, record);
        fs::write(&path, render_transcript(record)).await?;
        info!(path = %path.display(), lines = record.lines.len(), "Saved transcript");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptLine;
    use pretty_assertions::assert_eq;

    fn record(title: &str, lines: &[(&str, &str)]) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            lines: lines
                .iter()
                .map(|(author, citation)| TranscriptLine {
                    author: author.to_string(),
                    citation: citation.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_transcript() {
        let r = record("Ep", &[("A", "hello"), ("A", "world")]);
        assert_eq!(render_transcript(&r), "- A\nhello\n\n- A\nworld");
    }

    #[test]
    fn test_render_empty_transcript() {
        assert_eq!(render_transcript(&record("Ep", &[])), "");
    }

    #[test]
    fn test_transcript_path_is_sanitized() {
        let path = transcript_path(Path::new("/out"), &record("Q&A: who/what?", &[]));
        assert_eq!(path, PathBuf::from("/out/Q&A- who-what-.txt"));
    }

    #[tokio::test]
    async fn test_write_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            record("Episode 1", &[("Host", "Hi")]),
            record("Episode 2", &[]),
        ];

        let written = write_transcripts(&records, dir.path()).await.unwrap();

        assert_eq!(written.len(), 2);
        let first = std::fs::read_to_string(dir.path().join("Episode 1.txt")).unwrap();
        assert_eq!(first, "- Host\nHi");
        let second = std::fs::read_to_string(dir.path().join("Episode 2.txt")).unwrap();
        assert_eq!(second, "");
    }
}
