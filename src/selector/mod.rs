//! Selector Infrastructure
//!
//! Two kinds of selectors drive extraction:
//!
//! - **Candidate lists**: ordered CSS selectors tried one after another inside
//!   a scope, first acceptable match wins (`first_accepted`).
//! - **Rules**: predicate functions tested against every descendant, for
//!   conditions CSS cannot express cleanly (`query_all`).
//!
//! The concrete selector tables for review pages live in [`reviews`].

use dom_query::Selection;

use crate::dom;

pub mod reviews;
pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Outcome of resolving one candidate selector inside a scope.
///
/// A miss covers both "nothing matched" and "the selector could not be
/// evaluated"; callers move on to the next candidate either way.
#[derive(Debug, Clone)]
pub enum Lookup<'a> {
    /// First matching element in document order.
    Hit(Selection<'a>),
    /// Nothing usable for this candidate.
    Miss,
}

impl<'a> Lookup<'a> {
    /// Resolve `selector` against the descendants of `scope`.
    #[must_use]
    pub fn resolve(scope: &Selection<'a>, selector: &str) -> Self {
        match dom::query_selector(scope, selector) {
            Some(found) => Lookup::Hit(found),
            None => Lookup::Miss,
        }
    }
}

/// Try `candidates` in order inside `scope` and return the trimmed text of
/// the first resolved element that `accept` approves.
///
/// Only the first match of each candidate is considered. A candidate whose
/// match is rejected does not stop the search.
///
/// # Example
///
/// ```rust
/// use review_scraper::dom;
/// use review_scraper::selector::first_accepted;
///
/// let doc = dom::parse(r#"<div><h3>Hi</h3><p class="t">Long enough</p></div>"#);
/// let root = doc.select("div");
///
/// let found = first_accepted(&root, &["h3", "p.t"], |text| text.len() > 5);
/// assert_eq!(found.as_deref(), Some("Long enough"));
/// ```
#[must_use]
pub fn first_accepted<F>(scope: &Selection, candidates: &[&str], accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    candidates.iter().find_map(|candidate| {
        let Lookup::Hit(found) = Lookup::resolve(scope, candidate) else {
            tracing::trace!(candidate, "candidate selector missed");
            return None;
        };
        let text = dom::normalized_text(&found);
        if accept(&text) {
            Some(text)
        } else {
            tracing::trace!(candidate, len = dom::char_len(&text), "candidate text rejected");
            None
        }
    })
}

/// First selector in `candidates` with a non-empty match set inside `scope`,
/// with its index and every match in document order.
///
/// Results of different selectors are never merged.
#[must_use]
pub fn first_non_empty<'a>(
    scope: &Selection<'a>,
    candidates: &[&str],
) -> Option<(usize, Vec<Selection<'a>>)> {
    candidates.iter().enumerate().find_map(|(index, candidate)| {
        let matches = dom::query_selector_all(scope, candidate);
        (!matches.is_empty()).then_some((index, matches))
    })
}

/// Query for all elements matching the rule
///
/// Iterates through all descendants in document order and collects all
/// elements for which the rule returns true.
///
/// # Example
///
/// ```rust
/// use review_scraper::selector::{self, utils};
/// use review_scraper::dom;
///
/// let doc = dom::parse(r#"<div><p class="item">1</p><p class="item">2</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_item_class(sel: &dom_query::Selection) -> bool {
///     utils::attr(sel, "class").contains("item")
/// }
///
/// let results = selector::query_all(&root, has_item_class);
/// assert_eq!(results.len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
