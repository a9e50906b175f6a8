//! Field Extraction
//!
//! Pulls a title and a body out of one review container. Both fields walk an
//! ordered candidate list and take the first element whose trimmed text is
//! long enough. The body has one more fallback: the container's own text,
//! reduced to its substantial lines.
//!
//! Neither function can fail; a field that cannot be found is `""`.

use crate::dom::{self, char_len};
use crate::locator::ReviewContainer;
use crate::options::Thresholds;
use crate::selector::{first_accepted, reviews};

/// Title of the review held by `container`, or `""`.
#[must_use]
pub fn extract_title(container: &ReviewContainer, thresholds: &Thresholds) -> String {
    first_accepted(container.selection(), reviews::TITLE_CANDIDATES, |text| {
        char_len(text) > thresholds.min_title_len
    })
    .unwrap_or_default()
}

/// Body of the review held by `container`, or `""`.
///
/// Candidate selectors are tried first. When none yields a long enough body,
/// the container's full text is split into lines and only lines longer than
/// `min_text_len` are kept, joined by single spaces. Containers whose whole
/// text is `min_fallback_len` characters or shorter skip that fallback.
#[must_use]
pub fn extract_text(container: &ReviewContainer, thresholds: &Thresholds) -> String {
    first_accepted(container.selection(), reviews::TEXT_CANDIDATES, |text| {
        char_len(text) > thresholds.min_text_len
    })
    .unwrap_or_else(|| substantial_lines(&dom::normalized_text(container.selection()), thresholds))
}

/// Line-based body recovery used when no text candidate matched.
fn substantial_lines(all_text: &str, thresholds: &Thresholds) -> String {
    if char_len(all_text) <= thresholds.min_fallback_len {
        return String::new();
    }

    let lines: Vec<&str> = all_text
        .lines()
        .map(str::trim)
        .filter(|line| char_len(line) > thresholds.min_text_len)
        .collect();
    tracing::trace!(kept = lines.len(), "text recovered from container lines");
    lines.join(" ")
}
