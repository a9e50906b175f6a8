//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the locator and the
//! extractors. Text helpers return `StrTendril` where no copy is needed and
//! owned `String`s once text has been trimmed for output.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attributes and tags ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// All text content of the selection and its descendants, untouched.
///
/// Whitespace text nodes are kept, so line breaks from the markup survive.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with markup indentation removed.
///
/// See [`normalize_whitespace`].
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    normalize_whitespace(&text_content(sel))
}

/// Trim every line, collapse runs of spaces and tabs to one space, and drop
/// blank lines. Line breaks between non-blank lines are kept.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Length in characters (Unicode scalar values), not bytes.
#[inline]
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Ancestors of `sel`, nearest first, at most `levels` of them.
#[must_use]
pub fn ancestors<'a>(sel: &Selection<'a>, levels: usize) -> Vec<Selection<'a>> {
    let mut found = Vec::with_capacity(levels);
    let mut current = parent(sel);
    while found.len() < levels && current.exists() {
        found.push(current.clone());
        current = parent(&current);
    }
    found
}

// === Querying ===

/// First descendant matching a CSS selector, if any.
///
/// An invalid selector resolves to nothing rather than an error.
#[must_use]
pub fn query_selector<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    sel.try_select(selector)
        .and_then(|found| found.nodes().first().map(|node| Selection::from(*node)))
}

/// Every descendant matching a CSS selector, in document order, one
/// `Selection` per element. Empty for an invalid selector.
#[must_use]
pub fn query_selector_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.try_select(selector)
        .map(|found| found.nodes().iter().map(|node| Selection::from(*node)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_attribute() {
        let doc = parse(r#"<a href="/review/rw1" class="title">A title</a>"#);
        let a = doc.select("a");

        assert_eq!(get_attribute(&a, "href"), Some("/review/rw1".to_string()));
        assert_eq!(get_attribute(&a, "missing"), None);
        assert_eq!(tag_name(&a), Some("a".to_string()));
    }

    #[test]
    fn test_text_content_keeps_line_breaks() {
        let doc = parse("<div>\n  <p>one</p>\n  <p>two</p>\n</div>");
        let div = doc.select("div");

        let raw = text_content(&div);
        assert!(raw.contains('\n'));
        assert_eq!(normalized_text(&div).lines().count(), 2);
    }

    #[test]
    fn test_indentation_is_not_text() {
        let indent = " ".repeat(60);
        let doc = parse(&format!(
            "<div>\n{indent}<span>Meh.</span>\n{indent}<span>Ok.</span>\n{indent}</div>"
        ));
        let div = doc.select("div");

        assert_eq!(normalized_text(&div), "Meh.\nOk.");
        assert_eq!(char_len(&normalized_text(&div)), 8);
    }

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  a \t\t b  \n\n   \n c\u{a0}\u{a0}d \r\n"),
            "a b\nc d"
        );
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("café"), 4);
        assert_eq!("café".len(), 5);
    }

    #[test]
    fn test_ancestors_nearest_first_and_bounded() {
        let doc = parse(
            r#"<section id="s"><article id="a"><div id="d"><span id="x">x</span></div></article></section>"#,
        );
        let span = doc.select("#x");

        let found = ancestors(&span, 2);
        assert_eq!(found.len(), 2);
        assert_eq!(get_attribute(&found[0], "id"), Some("d".to_string()));
        assert_eq!(get_attribute(&found[1], "id"), Some("a".to_string()));
    }

    #[test]
    fn test_query_selector_first_match() {
        let doc = parse(r#"<div><p class="t">first</p><p class="t">second</p></div>"#);
        let root = doc.select("div");

        let found = query_selector(&root, "p.t");
        assert_eq!(found.map(|s| normalized_text(&s)), Some("first".to_string()));
        assert!(query_selector(&root, "span").is_none());
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let doc = parse(r#"<div><p>1</p><section><p>2</p></section><p>3</p></div>"#);
        let root = doc.select("div");

        let texts: Vec<String> = query_selector_all(&root, "p")
            .iter()
            .map(normalized_text)
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_invalid_selector_is_no_match() {
        let doc = parse("<div><p>content</p></div>");
        let root = doc.select("div");

        assert!(query_selector(&root, "p[").is_none());
        assert!(query_selector_all(&root, ":::").is_empty());
    }

    #[test]
    fn test_operations_on_empty_selection() {
        let doc = parse("<div>content</div>");
        let empty = doc.select("span");

        assert_eq!(tag_name(&empty), None);
        assert_eq!(normalized_text(&empty), "");
        assert!(ancestors(&empty, 3).is_empty());
        assert!(query_selector(&empty, "p").is_none());
    }
}
