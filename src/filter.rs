//! Result Filter
//!
//! Drops candidates whose body is too short to be a real review. Dropping is
//! silent; callers that care can compare counts.

use crate::result::{AcceptedReview, ExtractedReview};

/// Keep the candidates whose trimmed body is longer than 50 characters,
/// preserving order.
///
/// # Example
///
/// ```rust
/// use review_scraper::{filter, ExtractedReview};
///
/// let accepted = filter(vec![
///     ExtractedReview::new("Short", "Meh."),
///     ExtractedReview::new("Long", "A long enough body to clear the fifty character bar."),
/// ]);
/// assert_eq!(accepted.len(), 1);
/// assert_eq!(accepted[0].title(), "Long");
/// ```
#[must_use]
pub fn filter(candidates: Vec<ExtractedReview>) -> Vec<AcceptedReview> {
    candidates
        .into_iter()
        .filter_map(|review| AcceptedReview::try_from(review).ok())
        .collect()
}

/// Like [`filter`], with a stricter body threshold. Thresholds below 50 are
/// raised to 50.
#[must_use]
pub fn filter_with_min_len(candidates: Vec<ExtractedReview>, min_text_len: usize) -> Vec<AcceptedReview> {
    candidates
        .into_iter()
        .filter_map(|review| AcceptedReview::with_min_len(review, min_text_len).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::char_len;

    fn body(len: usize) -> String {
        "r".repeat(len)
    }

    #[test]
    fn test_order_preserved() {
        let accepted = filter(vec![
            ExtractedReview::new("one", body(60)),
            ExtractedReview::new("two", body(10)),
            ExtractedReview::new("three", body(70)),
        ]);
        let titles: Vec<&str> = accepted.iter().map(AcceptedReview::title).collect();
        assert_eq!(titles, vec!["one", "three"]);
    }

    #[test]
    fn test_every_accepted_body_is_long_enough() {
        let candidates: Vec<ExtractedReview> = (0..120)
            .map(|n| ExtractedReview::new(format!("t{n}"), format!("  {}\n", body(n))))
            .collect();

        let accepted = filter(candidates);
        assert_eq!(accepted.len(), 120 - 51);
        assert!(accepted.iter().all(|r| char_len(r.text().trim()) > 50));
    }

    #[test]
    fn test_empty_input() {
        assert!(filter(Vec::new()).is_empty());
    }

    #[test]
    fn test_stricter_threshold() {
        let candidates = vec![
            ExtractedReview::new("a", body(60)),
            ExtractedReview::new("b", body(90)),
        ];
        let accepted = filter_with_min_len(candidates, 75);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].title(), "b");
    }
}
