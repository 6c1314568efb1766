//! Queryable DOM backends for transcript extraction.
//!
//! The extractor is written once against [`DomQuery`]. Two backends exist:
//!
//! | Backend | Module | Source of the DOM |
//! |---------|--------|-------------------|
//! | [`StaticDom`] | [`static_html`] | Markup fetched over HTTP and parsed with `scraper` |
//! | [`BrowserDom`] | [`browser`] | A live WebDriver session driven by `fantoccini` |
//!
//! All methods are async because the browser backend issues a remote call for
//! every query. The static backend resolves immediately.

use thiserror::Error;

pub mod browser;
pub mod static_html;

pub use browser::BrowserDom;
pub use static_html::StaticDom;

/// Failure reported by a query backend.
///
/// Missing elements are never errors; these variants mean the backend could
/// not run the query at all.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("query backend failed: {0}")]
    Backend(String),
}

/// Capability interface over a loaded document.
///
/// Results are returned in document order. `scope` is any node previously
/// handed out by this backend; queries only look at its descendants.
pub trait DomQuery {
    /// Handle to an element in the document.
    type Node: Clone;

    /// The node that scopes whole-document queries.
    async fn root(&self) -> Result<Self::Node, QueryError>;

    async fn query_all(&self, scope: &Self::Node, selector: &str)
    -> Result<Vec<Self::Node>, QueryError>;

    async fn query_first(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, QueryError>;

    /// Raw `textContent` of `node`, untrimmed and including hidden descendants.
    async fn text_of(&self, node: &Self::Node) -> Result<String, QueryError>;
}
