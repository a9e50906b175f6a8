//! Alternative Extraction
//!
//! Last-resort strategy for pages where no review container pattern matched.
//! Every link pointing at a review becomes a title; its body is the first
//! sizeable block found by searching outward through the link's ancestors.

use dom_query::Selection;

use crate::document::RenderedDocument;
use crate::dom::{self, char_len};
use crate::options::Thresholds;
use crate::result::ExtractedReview;
use crate::selector::{self, reviews};

/// Pair review links with nearby body text across the whole document.
///
/// Links with no qualifying body nearby are dropped entirely.
#[must_use]
pub fn extract_alternative(doc: &RenderedDocument, thresholds: &Thresholds) -> Vec<ExtractedReview> {
    let links = selector::query_all(&doc.root(), reviews::is_review_link);
    tracing::debug!(links = links.len(), "review links found for alternative extraction");

    links
        .iter()
        .filter_map(|link| {
            let title = dom::normalized_text(link);
            let text = nearby_body(link, &title, thresholds)?;
            Some(ExtractedReview { title, text })
        })
        .collect()
}

/// Search up to `ALTERNATIVE_MAX_LEVELS` ancestors of `link`, nearest first,
/// for a descendant block longer than `min_alternative_len` whose text is not
/// just the title.
fn nearby_body(link: &Selection, title: &str, thresholds: &Thresholds) -> Option<String> {
    dom::ancestors(link, reviews::ALTERNATIVE_MAX_LEVELS)
        .iter()
        .find_map(|ancestor| {
            dom::query_selector_all(ancestor, reviews::ALTERNATIVE_BODY_BLOCK)
                .iter()
                .map(dom::normalized_text)
                .find(|text| char_len(text) > thresholds.min_alternative_len && text != title)
        })
}
