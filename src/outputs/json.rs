//! JSON export of every record extracted in one run.
//!
//! ```json
//! {
//!   "source": "https://example.com/podcast",
//!   "extracted_at": "2025-05-06T20:30:00+00:00",
//!   "articles": [
//!     { "title": "Episode 1", "lines": [{ "author": "Host", "citation": "Hi" }] }
//!   ]
//! }
//! ```

use crate::models::{ArticleRecord, TranscriptExport};
use chrono::Utc;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `records` with their source URL and write them to `path`.
///
/// Parent directories are created as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_export(
    records: &[ArticleRecord],
    source: &str,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let export = TranscriptExport {
        source,
        extracted_at: Utc::now().to_rfc3339(),
        articles: records,
    };
    let json = serde_json::to_string_pretty(&export)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(parent = %parent.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!("Wrote JSON export");
    Ok(())
}
