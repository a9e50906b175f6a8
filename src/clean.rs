//! Review text cleaning.
//!
//! Normalizes stored review bodies for the sentiment classifier: lowercase,
//! ASCII punctuation removed, English stop words dropped, tokens joined by
//! single spaces. Tokens are not lemmatized.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::ScrapedRecord;

/// English stop words (NLTK list).
pub static STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// A cleaned review body linked to the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub id: u64,
    pub scraped_id: u64,
    pub cleaned_text: String,
    pub created_at: DateTime<Utc>,
}

/// Clean one review body.
///
/// Punctuation is removed before stop words are matched, so contractions
/// such as "don't" become "dont" and are kept.
///
/// ```rust
/// use review_scraper::clean::clean_text;
///
/// assert_eq!(
///     clean_text("The dream-within-a-dream plot is, honestly, BRILLIANT!"),
///     "dreamwithinadream plot honestly brilliant"
/// );
/// ```
#[must_use]
pub fn clean_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    lowered
        .split_whitespace()
        .filter(|token| !STOP_WORD_SET.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean each record; ids are assigned from `first_id` upward.
#[must_use]
pub fn clean_records(records: &[ScrapedRecord], first_id: u64) -> Vec<CleanedRecord> {
    records
        .iter()
        .zip(first_id..)
        .map(|(record, id)| CleanedRecord {
            id,
            scraped_id: record.id,
            cleaned_text: clean_text(&record.raw_text),
            created_at: Utc::now(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_and_punctuation_removed() {
        assert_eq!(
            clean_text("I loved it. It was the best film of the year!"),
            "loved best film year"
        );
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(clean_text("  Great \n\n acting\t\tand   score "), "great acting score");
    }

    #[test]
    fn non_ascii_letters_survive() {
        assert_eq!(clean_text("Café scenes — superb"), "café scenes — superb");
    }

    #[test]
    fn only_stop_words_yields_empty() {
        assert_eq!(clean_text("It is what it is."), "");
    }

    #[test]
    fn records_keep_link_to_source() {
        let scraped = vec![
            ScrapedRecord {
                id: 7,
                source_url: "https://example.com".to_string(),
                review_title: "t".to_string(),
                raw_text: "A truly mind-bending experience.".to_string(),
                created_at: Utc::now(),
            },
            ScrapedRecord {
                id: 9,
                source_url: "https://example.com".to_string(),
                review_title: "u".to_string(),
                raw_text: "Not for me".to_string(),
                created_at: Utc::now(),
            },
        ];

        let cleaned = clean_records(&scraped, 3);
        assert_eq!(cleaned.len(), 2);
        assert_eq!((cleaned[0].id, cleaned[0].scraped_id), (3, 7));
        assert_eq!(cleaned[0].cleaned_text, "truly mindbending experience");
        assert_eq!((cleaned[1].id, cleaned[1].scraped_id), (4, 9));
        assert_eq!(cleaned[1].cleaned_text, "");
    }
}
