//! Static markup backend built on `scraper`.

use super::{DomQuery, QueryError};
use scraper::{ElementRef, Html, Selector};

/// Query adapter over an already parsed [`Html`] document.
///
/// The document is borrowed, so element handles are plain [`ElementRef`]s
/// that live as long as the parse tree.
#[derive(Clone, Copy)]
pub struct StaticDom<'a> {
    document: &'a Html,
}

impl<'a> StaticDom<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self { document }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, QueryError> {
    Selector::parse(selector).map_err(|e| QueryError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

impl<'a> DomQuery for StaticDom<'a> {
    type Node = ElementRef<'a>;

    async fn root(&self) -> Result<Self::Node, QueryError> {
        Ok(self.document.root_element())
    }

    async fn query_all(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, QueryError> {
        let selector = parse_selector(selector)?;
        Ok(scope.select(&selector).collect())
    }

    async fn query_first(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, QueryError> {
        let selector = parse_selector(selector)?;
        Ok(scope.select(&selector).next())
    }

    async fn text_of(&self, node: &Self::Node) -> Result<String, QueryError> {
        Ok(node.text().collect())
    }
}
