//! Result types for extraction output.
//!
//! `ExtractedReview` is what the extractors produce; `AcceptedReview` is what
//! survives the length filter and may be handed to a store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dom::char_len;

/// Body length (in characters, after trimming) a review must exceed to be
/// accepted.
pub const MIN_ACCEPTED_TEXT_LEN: usize = 50;

/// A raw (title, text) pair, either field possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReview {
    pub title: String,
    pub text: String,
}

impl ExtractedReview {
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// True when neither a title nor a body was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }
}

/// A review whose trimmed body is longer than `MIN_ACCEPTED_TEXT_LEN`
/// characters.
///
/// Fields are private so the invariant cannot be broken after construction;
/// the only way in is `TryFrom<ExtractedReview>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedReview {
    title: String,
    text: String,
}

impl AcceptedReview {
    /// Trimmed title; may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed body, always longer than `MIN_ACCEPTED_TEXT_LEN` characters.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accept `review` if its trimmed body is longer than `min_text_len`.
    ///
    /// `min_text_len` is raised to `MIN_ACCEPTED_TEXT_LEN` if lower, so no
    /// configuration can produce an accepted review with a shorter body.
    ///
    /// # Errors
    ///
    /// Returns the review unchanged when its body is too short.
    pub fn with_min_len(review: ExtractedReview, min_text_len: usize) -> Result<Self, ExtractedReview> {
        let text = review.text.trim();
        if char_len(text) > min_text_len.max(MIN_ACCEPTED_TEXT_LEN) {
            Ok(Self {
                title: review.title.trim().to_string(),
                text: text.to_string(),
            })
        } else {
            Err(review)
        }
    }
}

impl TryFrom<ExtractedReview> for AcceptedReview {
    type Error = ExtractedReview;

    fn try_from(review: ExtractedReview) -> Result<Self, Self::Error> {
        Self::with_min_len(review, MIN_ACCEPTED_TEXT_LEN)
    }
}

/// Which extraction path produced the candidates of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Review containers were located; fields extracted per container.
    Containers {
        /// Index into the container selector list that matched.
        selector: usize,
        /// Number of containers located.
        count: usize,
    },
    /// No containers; anchors and nearby blocks were paired instead.
    Alternative,
}

/// Outcome of one scrape pass, before persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    /// Page the reviews came from.
    pub source_url: String,

    /// When the page snapshot was taken.
    pub captured_at: DateTime<Utc>,

    /// Extraction path taken.
    pub strategy: Strategy,

    /// Candidates produced before filtering.
    pub extracted: usize,

    /// Reviews that passed the filter, in document order.
    pub accepted: Vec<AcceptedReview>,
}

impl ScrapeReport {
    /// Candidates dropped by the filter.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.extracted - self.accepted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_long_body_and_trims() {
        let body = format!("  {}  ", "x".repeat(51));
        let accepted = AcceptedReview::try_from(ExtractedReview::new(" Title ", body))
            .expect("51 characters should be accepted");
        assert_eq!(accepted.title(), "Title");
        assert_eq!(accepted.text().len(), 51);
    }

    #[test]
    fn rejects_exactly_fifty() {
        let review = ExtractedReview::new("t", "y".repeat(50));
        let rejected = AcceptedReview::try_from(review.clone()).unwrap_err();
        assert_eq!(rejected, review);
    }

    #[test]
    fn whitespace_does_not_count() {
        let review = ExtractedReview::new("", format!("{}\n\n\t   ", "z".repeat(40)));
        assert!(AcceptedReview::try_from(review).is_err());
    }

    #[test]
    fn lower_threshold_is_clamped() {
        let review = ExtractedReview::new("", "w".repeat(30));
        assert!(AcceptedReview::with_min_len(review, 10).is_err());
    }

    #[test]
    fn higher_threshold_is_honored() {
        let review = ExtractedReview::new("", "w".repeat(80));
        assert!(AcceptedReview::with_min_len(review.clone(), 100).is_err());
        assert!(AcceptedReview::with_min_len(review, 79).is_ok());
    }

    #[test]
    fn empty_title_is_kept_as_empty_string() {
        let accepted = AcceptedReview::try_from(ExtractedReview::new("", "q".repeat(60)))
            .expect("body is long enough");
        assert_eq!(accepted.title(), "");
    }

    #[test]
    fn strategy_serializes_snake_case() {
        let json = serde_json::to_string(&Strategy::Alternative).expect("serializable");
        assert_eq!(json, "\"alternative\"");
    }
}
