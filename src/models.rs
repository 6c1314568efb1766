//! Data models for selector configuration and extracted transcripts.
//!
//! - [`SelectorSet`]: selectors as written in the config (CSS or XPath)
//! - [`ResolvedSelectorSet`]: the same selectors translated to CSS
//! - [`TranscriptLine`]: one speaker-attributed quote
//! - [`ArticleRecord`]: all quotes of one article/episode, with its title
//! - [`TranscriptExport`]: JSON document wrapping every record of a run

use crate::selectors::translate;
use serde::{Deserialize, Serialize};

/// Author used for segments before any speaker has been seen in an article.
pub const DEFAULT_UNKNOWN_AUTHOR: &str = "Unknown";

/// The five selectors that drive extraction, as written in the config.
///
/// Each field is either a CSS selector or a restricted XPath expression
/// (see [`crate::selectors`]). `title`, `segment`, `author` and `citation`
/// are evaluated relative to their enclosing article or segment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectorSet {
    pub article: String,
    pub title: String,
    pub segment: String,
    pub author: String,
    pub citation: String,
}

impl SelectorSet {
    /// Translate every selector to CSS.
    pub fn resolve(&self) -> ResolvedSelectorSet {
        ResolvedSelectorSet {
            article: translate(&self.article),
            title: translate(&self.title),
            segment: translate(&self.segment),
            author: translate(&self.author),
            citation: translate(&self.citation),
        }
    }
}

/// A [`SelectorSet`] whose fields are all CSS.
///
/// Only [`SelectorSet::resolve`] builds one, so holding a value is proof that
/// translation already ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelectorSet {
    article: String,
    title: String,
    segment: String,
    author: String,
    citation: String,
}

impl ResolvedSelectorSet {
    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }
}

/// One quote and the speaker it is attributed to. `citation` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranscriptLine {
    pub author: String,
    pub citation: String,
}

/// Transcript of a single article, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Trimmed title text; empty when the title selector matched nothing.
    pub title: String,
    pub lines: Vec<TranscriptLine>,
}

/// Every record from one page, as written by the JSON sink.
#[derive(Debug, Serialize)]
pub struct TranscriptExport<'a> {
    /// URL the page was fetched from.
    pub source: &'a str,
    /// RFC 3339 timestamp of the run.
    pub extracted_at: String,
    pub articles: &'a [ArticleRecord],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> SelectorSet {
        SelectorSet {
            article: "//div[@class='episode']".to_string(),
            title: "h2".to_string(),
            segment: ".//p[contains(@class, 'line')]".to_string(),
            author: "//b".to_string(),
            citation: "span.quote".to_string(),
        }
    }

    #[test]
    fn test_resolve_translates_every_field() {
        let resolved = selectors().resolve();
        assert_eq!(resolved.article(), "div[class='episode']");
        assert_eq!(resolved.title(), "h2");
        assert_eq!(resolved.segment(), "p[class*='line']");
        assert_eq!(resolved.author(), "b");
        assert_eq!(resolved.citation(), "span.quote");
    }

    #[test]
    fn test_selector_set_deserialization() {
        let json = r#"{
            "article": ".episode",
            "title": "h2",
            "segment": ".line",
            "author": ".speaker",
            "citation": ".quote"
        }"#;
        let set: SelectorSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.article, ".episode");
        assert_eq!(set.resolve().citation(), ".quote");
    }

    #[test]
    fn test_article_record_serialization() {
        let record = ArticleRecord {
            title: "Episode 1".to_string(),
            lines: vec![TranscriptLine {
                author: "Host".to_string(),
                citation: "Welcome back".to_string(),
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("Episode 1"));
        assert!(json.contains("\"author\":\"Host\""));
    }
}
