//! Utility functions for selector rules
//!
//! Attribute and tag accessors that return empty strings instead of
//! `Option`, so rules can be written as plain boolean expressions.

use crate::dom;
use dom_query::Selection;

/// Get any attribute (empty string if missing)
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Check if element has a specific tag name
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    tag(sel) == expected
}

/// Check if the attribute exists and contains `needle` (case-sensitive)
///
/// # Example
///
/// ```rust
/// use review_scraper::selector::utils;
/// use review_scraper::dom;
///
/// let doc = dom::parse(r#"<a href="/title/tt1/reviews?ref_=tt_urv">All reviews</a>"#);
/// let a = doc.select("a");
///
/// assert!(utils::attr_contains(&a, "href", "review"));
/// assert!(!utils::attr_contains(&a, "href", "Review"));
/// assert!(!utils::attr_contains(&a, "title", "review"));
/// ```
#[inline]
#[must_use]
pub fn attr_contains(sel: &Selection, name: &str, needle: &str) -> bool {
    sel.attr(name).is_some_and(|value| value.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_is_empty() {
        let doc = dom::parse("<a>no href</a>");
        let a = doc.select("a");

        assert_eq!(attr(&a, "href"), "");
        assert!(!attr_contains(&a, "href", ""));
    }

    #[test]
    fn test_is_tag() {
        let doc = dom::parse("<article><a href='#'>x</a></article>");

        assert!(is_tag(&doc.select("a"), "a"));
        assert!(!is_tag(&doc.select("article"), "a"));
        assert_eq!(tag(&doc.select("span")), "");
    }
}
