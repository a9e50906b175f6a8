//! Rendered page snapshots.
//!
//! A `RenderedDocument` is the parsed HTML of one page at the moment it was
//! captured. The locator and the extractors only ever read from it.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use dom_query::{Document, Selection};
use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `<meta charset="...">` or the `charset=` part of a Content-Type meta.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;/>]+)"#).expect("valid regex")
});

/// Only the head of a page is searched for a charset declaration.
const CHARSET_SNIFF_BYTES: usize = 1024;

/// Immutable parsed representation of one fetched page.
pub struct RenderedDocument {
    url: String,
    captured_at: DateTime<Utc>,
    document: Document,
}

impl RenderedDocument {
    /// Parse rendered HTML captured from `url`, timestamped now.
    #[must_use]
    pub fn from_html(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            captured_at: Utc::now(),
            document: Document::from(html),
        }
    }

    /// Parse raw page bytes, decoding them with the charset the page declares.
    ///
    /// Undeclared pages are read as UTF-8. Undecodable bytes become U+FFFD.
    ///
    /// ```rust
    /// use review_scraper::RenderedDocument;
    ///
    /// let page = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
    /// let doc = RenderedDocument::from_bytes("file://saved.html", page);
    /// assert_eq!(doc.root().select("p").text().to_string(), "Café");
    /// ```
    #[must_use]
    pub fn from_bytes(url: impl Into<String>, bytes: &[u8]) -> Self {
        let (html, _, _) = declared_encoding(bytes).decode(bytes);
        Self::from_html(url, &html)
    }

    /// URL the page was loaded from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// When the snapshot was taken.
    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Selection over the whole document, the starting point for queries.
    #[must_use]
    pub fn root(&self) -> Selection<'_> {
        self.document.select("html")
    }
}

impl std::fmt::Debug for RenderedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedDocument")
            .field("url", &self.url)
            .field("captured_at", &self.captured_at)
            .finish_non_exhaustive()
    }
}

/// Encoding named by the first charset declaration in the page head.
fn declared_encoding(bytes: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_covers_whole_document() {
        let doc = RenderedDocument::from_html(
            "https://example.com/reviews",
            "<html><body><div id=\"a\">A</div><div id=\"b\">B</div></body></html>",
        );
        assert_eq!(doc.root().select("div").length(), 2);
        assert_eq!(doc.url(), "https://example.com/reviews");
    }

    #[test]
    fn fragment_gets_wrapped_in_html() {
        let doc = RenderedDocument::from_html("x", "<p>bare fragment</p>");
        assert_eq!(doc.root().select("p").text().to_string(), "bare fragment");
    }

    #[test]
    fn utf8_is_default_encoding() {
        assert_eq!(declared_encoding(b"<html><body>plain</body></html>"), UTF_8);
    }

    #[test]
    fn content_type_meta_is_honored() {
        let page = br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
        assert_eq!(declared_encoding(page).name(), "windows-1252");
    }

    #[test]
    fn windows_1252_bytes_decode() {
        let page = b"<html><head><meta charset=\"windows-1252\"></head><body><p>\x93Great\x94</p></body></html>";
        let doc = RenderedDocument::from_bytes("x", page);
        assert_eq!(
            doc.root().select("p").text().to_string(),
            "\u{201C}Great\u{201D}"
        );
    }

    #[test]
    fn unknown_charset_falls_back_to_utf8() {
        let page = "<meta charset=\"no-such-charset\"><p>é</p>".as_bytes();
        let doc = RenderedDocument::from_bytes("x", page);
        assert_eq!(doc.root().select("p").text().to_string(), "é");
    }

    #[test]
    fn debug_omits_document_tree() {
        let doc = RenderedDocument::from_html("https://example.com", "<p>x</p>");
        let printed = format!("{doc:?}");
        assert!(printed.contains("https://example.com"));
        assert!(!printed.contains("<p>"));
    }
}
