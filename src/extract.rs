//! Transcript extraction over any [`DomQuery`] backend.
//!
//! A page holds a sequence of articles (episodes), each holding a sequence of
//! segments (quotes). Every segment may name its speaker; when it does not,
//! the speaker of the previous emitted line in the same article is reused.
//!
//! ```text
//! article ──┬─ title
//!           ├─ segment ─┬─ author?   ─┐
//!           │           └─ citation   ├─> TranscriptLine
//!           └─ segment ...           ─┘
//! ```

use crate::dom::{DomQuery, QueryError};
use crate::models::{ArticleRecord, DEFAULT_UNKNOWN_AUTHOR, ResolvedSelectorSet, TranscriptLine};
use tracing::{debug, info, instrument};

/// Walks articles and segments and assembles [`ArticleRecord`]s.
#[derive(Debug, Clone)]
pub struct TranscriptExtractor {
    selectors: ResolvedSelectorSet,
    unknown_author: String,
}

impl TranscriptExtractor {
    pub fn new(selectors: ResolvedSelectorSet) -> Self {
        Self {
            selectors,
            unknown_author: DEFAULT_UNKNOWN_AUTHOR.to_string(),
        }
    }

    /// Override the author used before any speaker is known.
    pub fn with_unknown_author(mut self, unknown_author: impl Into<String>) -> Self {
        self.unknown_author = unknown_author.into();
        self
    }

    pub fn selectors(&self) -> &ResolvedSelectorSet {
        &self.selectors
    }

    /// Extract one record per article, in document order.
    ///
    /// # Errors
    ///
    /// Any [`QueryError`] from the backend aborts the whole document; records
    /// built before the failure are discarded.
    #[instrument(level = "info", skip_all, fields(article = %self.selectors.article()))]
    pub async fn extract<D: DomQuery>(&self, dom: &D) -> Result<Vec<ArticleRecord>, QueryError> {
        let root = dom.root().await?;
        let articles = dom.query_all(&root, self.selectors.article()).await?;
        info!(count = articles.len(), "Matched articles");

        let mut records = Vec::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            let record = self.extract_article(dom, article).await?;
            debug!(index, title = %record.title, lines = record.lines.len(), "Extracted article");
            records.push(record);
        }
        Ok(records)
    }

    async fn extract_article<D: DomQuery>(
        &self,
        dom: &D,
        article: &D::Node,
    ) -> Result<ArticleRecord, QueryError> {
        let title = first_text(dom, article, self.selectors.title()).await?;

        let mut last_author = self.unknown_author.clone();
        let mut lines = Vec::new();

        for segment in dom.query_all(article, self.selectors.segment()).await? {
            let author = first_text(dom, &segment, self.selectors.author()).await?;
            let citation = first_text(dom, &segment, self.selectors.citation()).await?;
            if citation.is_empty() {
                continue;
            }

            let author = if author.is_empty() { last_author } else { author };
            last_author = author.clone();
            lines.push(TranscriptLine { author, citation });
        }

        Ok(ArticleRecord { title, lines })
    }
}

/// Trimmed text of the first match of `selector` under `scope`, or `""`.
async fn first_text<D: DomQuery>(
    dom: &D,
    scope: &D::Node,
    selector: &str,
) -> Result<String, QueryError> {
    match dom.query_first(scope, selector).await? {
        Some(node) => Ok(dom.text_of(&node).await?.trim().to_string()),
        None => Ok(String::new()),
    }
}
