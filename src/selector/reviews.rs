//! Review Page Selectors
//!
//! Selector tables for user-review pages. Each list is ordered from most to
//! least specific; order is significant and part of the extraction contract.
//! Markup for these pages drifts between site versions and experiments, so
//! several generations of class names and test ids are listed side by side.

use dom_query::Selection;

use crate::selector::utils::{attr_contains, is_tag};

/// Review container patterns, in priority order.
///
/// 1. current markup: `data-testid` attribute
/// 2. class-based container
/// 3. legacy list item
pub static CONTAINERS: &[&str] = &[
    r#"div[data-testid="review-card"]"#,
    "div.review-container",
    "div.lister-item",
];

/// Review title candidates, tried in order inside one container.
pub static TITLE_CANDIDATES: &[&str] = &[
    "a.title",
    "h3 a",
    r#"div[data-testid="review-title"]"#,
    ".review-title",
    ".titleReviewBarItem .titleReviewBarSubItem .title",
    r#"a[href*="review"]"#,
    ".ipc-title__text",
    "h4 a",
];

/// Review body candidates, tried in order inside one container.
pub static TEXT_CANDIDATES: &[&str] = &[
    "div.text.show-more__control",
    r#"div[data-testid="review-summary"]"#,
    r#"div[data-testid="review-text"]"#,
    ".review-text",
    ".content .text",
    "div.content",
    ".lister-item-content .text",
    r#"div[class*="review-text"]"#,
    ".ipc-html-content-inner-div",
];

/// Substring of an anchor's link target that marks it as a review link.
pub const REVIEW_LINK_MARKER: &str = "review";

/// Blocks scanned near a review link for a body in alternative extraction.
pub const ALTERNATIVE_BODY_BLOCK: &str = "div";

/// How many ancestors of a review link are searched for its body.
pub const ALTERNATIVE_MAX_LEVELS: usize = 3;

/// Rule: anchor whose `href` contains [`REVIEW_LINK_MARKER`].
#[must_use]
pub fn is_review_link(sel: &Selection) -> bool {
    is_tag(sel, "a") && attr_contains(sel, "href", REVIEW_LINK_MARKER)
}
