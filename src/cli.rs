//! Command-line interface definitions for the transcript scraper.
//!
//! Everything about *what* to scrape lives in the config file; the flags only
//! choose the fetch strategy and override output locations.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Static fetch using ./config.json
/// transcript_scraper
///
/// # Render the page in a browser through a running chromedriver
/// transcript_scraper podcasts.yaml --render --webdriver-url http://localhost:4444
///
/// # Also dump every record as JSON
/// transcript_scraper config.json --json-output transcripts.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON or YAML config file
    #[arg(default_value = "./config.json")]
    pub config: PathBuf,

    /// Render the page in a WebDriver-controlled browser instead of fetching static HTML
    #[arg(short, long)]
    pub render: bool,

    /// Override the config's result folder
    #[arg(short = 'o', long)]
    pub result_folder: Option<PathBuf>,

    /// Also write all records to this JSON file
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Override the WebDriver endpoint used with --render
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["transcript_scraper"]);
        assert_eq!(cli.config, PathBuf::from("./config.json"));
        assert!(!cli.render);
        assert!(cli.result_folder.is_none());
        assert!(cli.json_output.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "transcript_scraper",
            "shows.yaml",
            "-r",
            "-o",
            "/tmp/out",
            "-j",
            "/tmp/all.json",
        ]);

        assert_eq!(cli.config, PathBuf::from("shows.yaml"));
        assert!(cli.render);
        assert_eq!(cli.result_folder, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.json_output, Some(PathBuf::from("/tmp/all.json")));
    }

    #[test]
    fn test_cli_webdriver_url() {
        let cli = Cli::parse_from([
            "transcript_scraper",
            "--render",
            "--webdriver-url",
            "http://localhost:4444",
        ]);
        assert_eq!(cli.webdriver_url.as_deref(), Some("http://localhost:4444"));
    }
}
