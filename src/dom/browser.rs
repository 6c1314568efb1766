//! Live browser backend driven over WebDriver with `fantoccini`.
//!
//! Every query is a round-trip to the WebDriver server, so the extractor
//! awaits them one at a time in document order.

use super::{DomQuery, QueryError};
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Query adapter over a WebDriver session.
pub struct BrowserDom {
    client: Client,
}

impl BrowserDom {
    /// Open a new Chrome session on the WebDriver server at `webdriver_url`.
    #[instrument(level = "info", skip_all, fields(%webdriver_url, headless = headless))]
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        user_agent: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let mut args = vec![format!("--user-agent={user_agent}")];
        if headless {
            args.push("--headless".to_string());
            args.push("--disable-gpu".to_string());
        }

        let mut caps = serde_json::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;
        info!("WebDriver session opened");
        Ok(Self { client })
    }

    /// Navigate to `url` and wait up to `timeout` for `ready_selector` to appear.
    ///
    /// A page that never shows the selector is not an error here: it simply
    /// yields no articles once extraction runs.
    #[instrument(level = "info", skip(self, timeout), fields(timeout_secs = timeout.as_secs()))]
    pub async fn load(
        &self,
        url: &str,
        ready_selector: &str,
        timeout: Duration,
    ) -> Result<(), Box<dyn Error>> {
        self.client.goto(url).await?;
        if let Err(e) = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(ready_selector))
            .await
        {
            warn!(error = %e, "Ready selector did not appear; continuing with current DOM");
        }
        Ok(())
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.client.close().await?;
        Ok(())
    }
}

fn query_error(selector: &str, err: CmdError) -> QueryError {
    match err {
        CmdError::Standard(ref wd) if matches!(wd.error, ErrorStatus::InvalidSelector) => {
            QueryError::InvalidSelector {
                selector: selector.to_string(),
                reason: err.to_string(),
            }
        }
        other => QueryError::Backend(other.to_string()),
    }
}

impl DomQuery for BrowserDom {
    type Node = Element;

    async fn root(&self) -> Result<Self::Node, QueryError> {
        self.client
            .find(Locator::Css(":root"))
            .await
            .map_err(|e| query_error(":root", e))
    }

    async fn query_all(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, QueryError> {
        scope
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| query_error(selector, e))
    }

    async fn query_first(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, QueryError> {
        // find_all avoids treating "no such element" as a failure
        Ok(self.query_all(scope, selector).await?.into_iter().next())
    }

    /// Raw `textContent`, so hidden nodes read the same as in static markup.
    async fn text_of(&self, node: &Self::Node) -> Result<String, QueryError> {
        node.prop("textContent")
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| QueryError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantoccini::error::WebDriver;

    #[test]
    fn test_invalid_selector_status_maps_to_invalid_selector() {
        let err = CmdError::Standard(WebDriver::new(
            ErrorStatus::InvalidSelector,
            "invalid selector: An invalid or illegal selector was specified",
        ));
        match query_error("div[", err) {
            QueryError::InvalidSelector { selector, reason } => {
                assert_eq!(selector, "div[");
                assert!(reason.contains("invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_statuses_map_to_backend() {
        let err = CmdError::Standard(WebDriver::new(ErrorStatus::NoSuchWindow, "window closed"));
        assert!(matches!(query_error(".ep", err), QueryError::Backend(_)));
    }
}
