//! Restricted XPath to CSS selector translation.
//!
//! Selector configs may be written either as CSS or as a small XPath subset:
//! descendant (`//`, `.//`) and child (`/`) axes, positional predicates
//! (`[2]`), attribute equality (`[@id='x']`) and attribute substring matches
//! (`[contains(@class, 'btn')]`). Anything that does not start with `//` or
//! `.//` is treated as CSS already and passed through untouched.
//!
//! The translation is a fixed sequence of textual rewrites ([`STEPS`]). Later
//! steps rely on the normalization done by earlier ones, so the order is part
//! of the contract. Syntax outside the subset is rewritten on a best-effort
//! basis and never rejected.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static RELATIVE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\.//)+").unwrap());
static POSITIONAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());
static CONTAINS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[contains\(\s*([\w:-]+)\s*,\s*(?:'([^']*)'|"([^"]*)")\s*\)\]"#).unwrap()
});
static EQUALITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[\s*([\w:-]+)\s*=\s*(?:'([^']*)'|"([^"]*)"|([^\]'"\s]*))\s*\]"#).unwrap()
});

/// A single rewrite applied during translation.
pub type RewriteStep = fn(&str) -> String;

/// Rewrite steps in application order.
pub const STEPS: [(&str, RewriteStep); 7] = [
    ("relative_prefix", relative_prefix),
    ("descendant_axis", descendant_axis),
    ("positional_predicate", positional_predicate),
    ("child_axis", child_axis),
    ("strip_attribute_marker", strip_attribute_marker),
    ("contains_predicate", contains_predicate),
    ("equality_predicate", equality_predicate),
];

/// Returns true when `input` uses the XPath dialect rather than CSS.
pub fn is_xpath(input: &str) -> bool {
    input.starts_with("//") || input.starts_with(".//")
}

/// Translate a restricted XPath expression into a CSS selector.
///
/// Inputs that are not XPath (including the empty string) come back
/// unchanged. The output never contains `/`, so translating twice gives the
/// same result as translating once.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(translate("//div[2]/span"), "div:nth-child(2) > span");
/// assert_eq!(translate("//a[contains(@class, 'btn')]"), "a[class*='btn']");
/// assert_eq!(translate(".episode h2"), ".episode h2");
/// ```
pub fn translate(input: &str) -> String {
    if !is_xpath(input) {
        return input.to_string();
    }

    let rewritten = STEPS
        .iter()
        .fold(input.to_string(), |acc, (_, step)| step(&acc));
    let css = rewritten.trim().to_string();

    debug!(xpath = %input, css = %css, "Translated XPath selector");
    css
}

/// `.//` at the start (possibly repeated) becomes a descendant context.
pub fn relative_prefix(s: &str) -> String {
    RELATIVE_PREFIX.replace(s, " ").into_owned()
}

pub fn descendant_axis(s: &str) -> String {
    s.replace("//", " ")
}

/// `[N]` becomes `:nth-child(N)`.
pub fn positional_predicate(s: &str) -> String {
    POSITIONAL.replace_all(s, ":nth-child($1)").into_owned()
}

pub fn child_axis(s: &str) -> String {
    s.replace('/', " > ")
}

pub fn strip_attribute_marker(s: &str) -> String {
    s.replace('@', "")
}

/// Wrap `value` in single quotes, escaping backslashes and single quotes.
fn quote_css(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `[contains(ATTR, 'VALUE')]` becomes `[ATTR*='VALUE']`.
pub fn contains_predicate(s: &str) -> String {
    CONTAINS
        .replace_all(s, |caps: &Captures| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            format!("[{}*={}]", &caps[1], quote_css(value))
        })
        .into_owned()
}

/// `[ATTR=VALUE]` with any quoting becomes `[ATTR='VALUE']`.
pub fn equality_predicate(s: &str) -> String {
    EQUALITY
        .replace_all(s, |caps: &Captures| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            format!("[{}={}]", &caps[1], quote_css(value))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_passes_through() {
        for css in [".episode", "div > p.quote", "article h2", "#main", "", "a[href*='x']"] {
            assert_eq!(translate(css), css);
        }
    }

    #[test]
    fn test_descendant_and_child_axes() {
        assert_eq!(translate("//div"), "div");
        assert_eq!(translate("//div//span"), "div span");
        assert_eq!(translate("//div/p/span"), "div > p > span");
        assert_eq!(translate(".//p"), "p");
        assert_eq!(translate(".//.//p/b"), "p > b");
    }

    #[test]
    fn test_positional_predicate() {
        let css = translate("//div[2]");
        assert!(css.contains(":nth-child(2)"));
        assert!(!css.contains("[2]"));
        assert_eq!(translate("//ul/li[10]"), "ul > li:nth-child(10)");
    }

    #[test]
    fn test_contains_predicate() {
        let css = translate("//a[contains(@class, 'btn')]");
        assert!(css.contains("[class*='btn']"));
        assert!(!css.contains('@'));
        assert!(!css.contains("contains("));
        assert_eq!(css, "a[class*='btn']");
    }

    #[test]
    fn test_contains_with_double_quotes() {
        assert_eq!(
            translate(r#"//div[contains(@class,"quote")]"#),
            "div[class*='quote']"
        );
    }

    #[test]
    fn test_equality_predicate_quoting() {
        assert!(translate("//span[@id='x']").contains("[id='x']"));
        assert_eq!(translate(r#"//span[@id="x"]"#), "span[id='x']");
        assert_eq!(translate("//span[@id=x]"), "span[id='x']");
        assert_eq!(
            translate("//div[@data-role='speaker']/b"),
            "div[data-role='speaker'] > b"
        );
    }

    #[test]
    fn test_quotes_in_values_are_escaped() {
        assert_eq!(translate(r#"//a[@title="it's"]"#), r"a[title='it\'s']");
        assert_eq!(
            translate(r#"//a[contains(@title, "it's")]"#),
            r"a[title*='it\'s']"
        );
        assert_eq!(translate(r#"//a[@title="a\b"]"#), r"a[title='a\\b']");
    }

    #[tokio::test]
    async fn test_escaped_value_is_accepted_by_query_engine() {
        use crate::dom::{DomQuery, StaticDom};
        use scraper::Html;

        let html =
            Html::parse_document(r#"<div title="it's"><p>quote</p></div><div title="its"></div>"#);
        let dom = StaticDom::new(&html);
        let root = dom.root().await.unwrap();

        let matches = dom
            .query_all(&root, &translate(r#"//div[@title="it's"]"#))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(dom.text_of(&matches[0]).await.unwrap(), "quote");

        let contains = dom
            .query_all(&root, &translate(r#"//div[contains(@title, "t's")]"#))
            .await
            .unwrap();
        assert_eq!(contains.len(), 1);
    }

    #[test]
    fn test_translate_is_idempotent() {
        let inputs = [
            "//div[2]",
            ".//p[@class='a']//span",
            "//a[contains(@class, 'btn')]/b",
            "div.episode",
            "",
            "//div[following-sibling::p]",
            "//p/text()",
        ];
        for input in inputs {
            let once = translate(input);
            assert_eq!(translate(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_unsupported_syntax_degrades_without_panicking() {
        let css = translate("//div[@a='1'][@b='2']/text()");
        assert!(!css.contains('/'));
        assert!(!css.contains('@'));
    }

    #[test]
    fn test_steps_are_ordered() {
        let names: Vec<_> = STEPS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "relative_prefix",
                "descendant_axis",
                "positional_predicate",
                "child_axis",
                "strip_attribute_marker",
                "contains_predicate",
                "equality_predicate",
            ]
        );
    }

    #[test]
    fn test_individual_steps() {
        assert_eq!(relative_prefix(".//.//a"), " a");
        assert_eq!(relative_prefix("a.//b"), "a.//b");
        assert_eq!(descendant_axis("//a//b"), " a b");
        assert_eq!(positional_predicate("li[3]"), "li:nth-child(3)");
        assert_eq!(child_axis("a/b"), "a > b");
        assert_eq!(strip_attribute_marker("[@id='x']"), "[id='x']");
        assert_eq!(contains_predicate("a[contains(class, 'x')]"), "a[class*='x']");
        assert_eq!(equality_predicate("a[id=\"x\"]"), "a[id='x']");
        // contains output is not re-matched by the equality step
        assert_eq!(equality_predicate("a[class*='x']"), "a[class*='x']");
    }
}
