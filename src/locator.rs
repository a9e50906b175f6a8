//! Review Container Locator
//!
//! Finds the subtrees of a page that each hold one review. The container
//! patterns in [`selector::reviews::CONTAINERS`] are tried in priority order
//! and the first pattern with any match wins outright.

use dom_query::Selection;

use crate::document::RenderedDocument;
use crate::selector::{self, reviews::CONTAINERS};

/// A subtree of a rendered page believed to hold exactly one review.
///
/// Borrows from the document; it cannot outlive the pass that produced it.
#[derive(Debug, Clone)]
pub struct ReviewContainer<'doc> {
    selection: Selection<'doc>,
}

impl<'doc> ReviewContainer<'doc> {
    /// Wrap an element as a container. Used by the locator and by callers
    /// that already know where a review lives.
    #[must_use]
    pub fn new(selection: Selection<'doc>) -> Self {
        Self { selection }
    }

    /// The container element.
    #[must_use]
    pub fn selection(&self) -> &Selection<'doc> {
        &self.selection
    }
}

/// Containers found on a page and the pattern that found them.
#[derive(Debug, Clone)]
pub struct Located<'doc> {
    /// Index into `CONTAINERS` of the winning pattern.
    pub selector: usize,
    /// Containers in document order.
    pub containers: Vec<ReviewContainer<'doc>>,
}

/// Locate review containers, or `None` when no pattern matches anything.
///
/// `None` is the normal signal to fall back to alternative extraction.
#[must_use]
pub fn locate_with_pattern(doc: &RenderedDocument) -> Option<Located<'_>> {
    let root = doc.root();
    let (selector, matches) = selector::first_non_empty(&root, CONTAINERS)?;
    tracing::debug!(
        pattern = CONTAINERS[selector],
        count = matches.len(),
        "review containers located"
    );
    Some(Located {
        selector,
        containers: matches.into_iter().map(ReviewContainer::new).collect(),
    })
}

/// Locate review containers in document order; empty if none were found.
///
/// Does not modify the document, so repeated calls return the same sequence.
///
/// # Example
///
/// ```rust
/// use review_scraper::{locate, RenderedDocument};
///
/// let doc = RenderedDocument::from_html(
///     "https://example.com/reviews",
///     r#"<div data-testid="review-card">one</div><div data-testid="review-card">two</div>"#,
/// );
/// assert_eq!(locate(&doc).len(), 2);
/// ```
#[must_use]
pub fn locate(doc: &RenderedDocument) -> Vec<ReviewContainer<'_>> {
    locate_with_pattern(doc)
        .map(|located| located.containers)
        .unwrap_or_default()
}
