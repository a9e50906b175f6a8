//! Review Extraction
//!
//! Turns a rendered page into candidate reviews. Located containers go
//! through per-field extraction; a page with no containers goes through the
//! alternative extractor instead, never both.

pub mod alternative;
pub mod fields;

use crate::document::RenderedDocument;
use crate::locator::{self, ReviewContainer};
use crate::options::Thresholds;
use crate::result::{ExtractedReview, Strategy};

pub use alternative::extract_alternative;
pub use fields::{extract_text, extract_title};

/// Candidate reviews from one page and the path that produced them.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub strategy: Strategy,
    pub reviews: Vec<ExtractedReview>,
}

/// Extract title and body from each container.
///
/// Containers where both fields come back empty are skipped.
#[must_use]
pub fn extract_from_containers(
    containers: &[ReviewContainer],
    thresholds: &Thresholds,
) -> Vec<ExtractedReview> {
    containers
        .iter()
        .map(|container| ExtractedReview {
            title: extract_title(container, thresholds),
            text: extract_text(container, thresholds),
        })
        .filter(|review| !review.is_empty())
        .collect()
}

/// Run the locator, then the matching extraction strategy.
#[must_use]
pub fn extract_reviews(doc: &RenderedDocument, thresholds: &Thresholds) -> Extraction {
    match locator::locate_with_pattern(doc) {
        Some(located) => {
            tracing::info!("Found {} review containers", located.containers.len());
            Extraction {
                strategy: Strategy::Containers {
                    selector: located.selector,
                    count: located.containers.len(),
                },
                reviews: extract_from_containers(&located.containers, thresholds),
            }
        }
        None => {
            tracing::info!("No review containers found; trying review links");
            Extraction {
                strategy: Strategy::Alternative,
                reviews: extract_alternative(doc, thresholds),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_containers_are_skipped() {
        let doc = RenderedDocument::from_html(
            "x",
            r#"
            <div class="review-container"><span>5/10</span></div>
            <div class="review-container"><a class="title">A proper title</a></div>
            "#,
        );

        let extraction = extract_reviews(&doc, &Thresholds::default());
        assert_eq!(
            extraction.strategy,
            Strategy::Containers { selector: 1, count: 2 }
        );
        assert_eq!(extraction.reviews, vec![ExtractedReview::new("A proper title", "")]);
    }

    #[test]
    fn test_alternative_only_without_containers() {
        let body = "Q".repeat(150);
        let doc = RenderedDocument::from_html(
            "x",
            &format!(r#"<div><div><a href="/review/1">Linked title</a></div><div>{body}</div></div>"#),
        );

        let extraction = extract_reviews(&doc, &Thresholds::default());
        assert_eq!(extraction.strategy, Strategy::Alternative);
        assert_eq!(extraction.reviews, vec![ExtractedReview::new("Linked title", body)]);
    }

    #[test]
    fn test_containers_suppress_alternative_even_when_empty() {
        let body = "Z".repeat(150);
        let doc = RenderedDocument::from_html(
            "x",
            &format!(r#"
                <div class="lister-item"></div>
                <div><div><a href="/review/1">Linked title</a></div><div>{body}</div></div>
            "#),
        );

        let extraction = extract_reviews(&doc, &Thresholds::default());
        assert!(matches!(extraction.strategy, Strategy::Containers { .. }));
        assert!(extraction.reviews.is_empty());
    }
}
