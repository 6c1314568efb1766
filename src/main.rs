//! # Transcript Scraper
//!
//! Extracts speaker-attributed transcripts from HTML pages and writes one
//! text file per article (episode), driven entirely by a selector config.
//!
//! ## Features
//!
//! - Selectors may be CSS or a restricted XPath subset, translated to CSS
//! - Static fetch over HTTP, or a full browser render through WebDriver
//! - Speakers carry forward across segments that omit them
//! - Optional JSON export of every record
//!
//! ## Usage
//!
//! ```sh
//! transcript_scraper config.json
//! transcript_scraper config.yaml --render --json-output all.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Config**: load the config file and translate its selectors to CSS
//! 2. **Fetching**: static HTML (retried with backoff) or a rendered browser session
//! 3. **Extraction**: walk articles and segments via the [`dom::DomQuery`] backend
//! 4. **Output**: write transcript files and, optionally, a JSON export

use clap::Parser;
use scraper::Html;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod dom;
mod extract;
mod fetch;
mod models;
mod outputs;
mod selectors;
mod utils;

use cli::Cli;
use config::Config;
use dom::{BrowserDom, StaticDom};
use extract::TranscriptExtractor;
use fetch::fetch_with_backoff;
use models::ArticleRecord;
use outputs::{json, text};
use utils::{reset_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("transcript_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config.display(), error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    if let Some(folder) = args.result_folder.clone() {
        config.result_folder = folder;
    }
    if let Some(url) = args.webdriver_url.clone() {
        config.render.webdriver_url = url;
    }

    let extractor = TranscriptExtractor::new(config.selectors.resolve())
        .with_unknown_author(&config.unknown_author);
    info!(selectors = ?extractor, "Resolved selectors");

    if let Err(e) = reset_dir(&config.result_folder).await {
        error!(
            path = %config.result_folder.display(),
            error = %e,
            "Result directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let records = if args.render {
        extract_rendered(&config, &extractor).await
    } else {
        extract_static(&config, &extractor).await
    };
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            error!(url = %config.url, error = %e, "Extraction failed");
            return Err(e);
        }
    };

    let total_lines: usize = records.iter().map(|r| r.lines.len()).sum();
    info!(articles = records.len(), lines = total_lines, "Extraction complete");

    text::write_transcripts(&records, &config.result_folder).await?;

    if let Some(path) = &args.json_output {
        if let Err(e) = json::write_export(&records, &config.url, path).await {
            error!(path = %path.display(), error = %e, "Failed to write JSON export");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Fetch the page over HTTP and extract from the parsed markup.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
async fn extract_static(
    config: &Config,
    extractor: &TranscriptExtractor,
) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let html = fetch_with_backoff(&config.url, &config.user_agent).await?;
    let document = Html::parse_document(&html);
    let records = extractor.extract(&StaticDom::new(&document)).await?;

    if records.is_empty() {
        warn!("No articles matched the article selector");
        debug!(preview = %truncate_for_log(&html, 300), "Fetched markup");
    }
    Ok(records)
}

/// Render the page in a WebDriver session and extract from the live DOM.
///
/// The session is closed whether or not extraction succeeds.
#[instrument(level = "info", skip_all, fields(url = %config.url, webdriver = %config.render.webdriver_url))]
async fn extract_rendered(
    config: &Config,
    extractor: &TranscriptExtractor,
) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let browser = BrowserDom::connect(
        &config.render.webdriver_url,
        config.render.headless,
        &config.user_agent,
    )
    .await?;

    let result: Result<Vec<ArticleRecord>, Box<dyn Error>> = async {
        browser
            .load(
                &config.url,
                extractor.selectors().article(),
                Duration::from_secs(config.render.wait_timeout_secs),
            )
            .await?;
        Ok(extractor.extract(&browser).await?)
    }
    .await;

    if let Err(e) = browser.close().await {
        warn!(error = %e, "Failed to close WebDriver session");
    }
    result
}
