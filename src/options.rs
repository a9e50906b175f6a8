//! Configuration options for a scrape pass.
//!
//! `ScrapeOptions` carries everything a pass needs: where to go, how long to
//! wait, which buttons to press, and the length thresholds the extractors
//! accept. All fields are public; start from `Default::default()`.

use std::time::Duration;

/// Reviews page scraped when no URL is given.
pub const DEFAULT_URL: &str = "https://www.imdb.com/title/tt1375666/reviews";

/// Desktop Chrome user agent sent instead of the headless default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Minimum character counts used by the extractors and the result filter.
///
/// Every comparison is strict (`len > threshold`) and counts Unicode scalar
/// values of the trimmed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A title candidate must be longer than this.
    ///
    /// Default: `5`
    pub min_title_len: usize,

    /// A text candidate, a fallback line, and an accepted review body must be
    /// longer than this.
    ///
    /// Default: `50`
    pub min_text_len: usize,

    /// The line-based text fallback only runs when the whole container text
    /// is longer than this.
    ///
    /// Default: `100`
    pub min_fallback_len: usize,

    /// A block found near a review anchor must be longer than this to become
    /// the body in alternative extraction.
    ///
    /// Default: `100`
    pub min_alternative_len: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_title_len: 5,
            min_text_len: 50,
            min_fallback_len: 100,
            min_alternative_len: 100,
        }
    }
}

/// Marker strings used to discover one family of buttons.
///
/// A button matches when its text contains any of `text` or its class
/// attribute contains any of `class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMarkers {
    pub text: Vec<String>,
    pub class: Vec<String>,
}

impl ButtonMarkers {
    #[must_use]
    pub fn new(text: &[&str], class: &[&str]) -> Self {
        Self {
            text: text.iter().map(|s| (*s).to_string()).collect(),
            class: class.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Spoiler reveal buttons.
    #[must_use]
    pub fn spoiler() -> Self {
        Self::new(&["spoiler"], &["spoiler"])
    }

    /// "Show more" expanders.
    #[must_use]
    pub fn show_more() -> Self {
        Self::new(&["Show more"], &["show-more"])
    }

    /// True when there is nothing to look for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.class.is_empty()
    }

    /// XPath selecting every `<button>` that matches these markers.
    ///
    /// ```rust
    /// use review_scraper::ButtonMarkers;
    ///
    /// let xpath = ButtonMarkers::spoiler().to_xpath();
    /// assert_eq!(
    ///     xpath,
    ///     "//button[contains(text(), 'spoiler') or contains(@class, 'spoiler')]"
    /// );
    /// ```
    #[must_use]
    pub fn to_xpath(&self) -> String {
        let conditions: Vec<String> = self
            .text
            .iter()
            .map(|m| format!("contains(text(), {})", xpath_literal(m)))
            .chain(
                self.class
                    .iter()
                    .map(|m| format!("contains(@class, {})", xpath_literal(m))),
            )
            .collect();
        format!("//button[{}]", conditions.join(" or "))
    }
}

/// Quote a string for XPath 1.0, which has no escape sequences.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    if !s.contains('"') {
        return format!("\"{s}\"");
    }
    let parts: Vec<String> = s.split('\'').map(|p| format!("'{p}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Timing and marker configuration for the dynamic content settler.
#[derive(Debug, Clone)]
pub struct SettleOptions {
    /// Buttons clicked first to reveal spoiler-hidden reviews.
    pub spoiler: ButtonMarkers,

    /// Buttons clicked second to expand truncated reviews.
    pub show_more: ButtonMarkers,

    /// Pause after each click.
    ///
    /// Default: 1 second
    pub click_pause: Duration,

    /// Pause after scrolling to the bottom of the page.
    ///
    /// Default: 3 seconds
    pub scroll_pause: Duration,
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self {
            spoiler: ButtonMarkers::spoiler(),
            show_more: ButtonMarkers::show_more(),
            click_pause: Duration::from_secs(1),
            scroll_pause: Duration::from_secs(3),
        }
    }
}

/// Configuration options for one scrape pass.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use review_scraper::ScrapeOptions;
///
/// let options = ScrapeOptions {
///     url: "https://example.com/title/tt0000001/reviews".to_string(),
///     settle_wait: Duration::from_secs(2),
///     ..ScrapeOptions::default()
/// };
/// assert!(options.headless);
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Page to scrape.
    ///
    /// Default: [`DEFAULT_URL`]
    pub url: String,

    /// Wait after navigation before settling dynamic content.
    ///
    /// Default: 5 seconds
    pub settle_wait: Duration,

    /// Upper bound on page navigation.
    ///
    /// Default: 30 seconds
    pub navigation_timeout: Duration,

    /// Run Chrome without a window.
    ///
    /// Default: `true`
    pub headless: bool,

    /// Run Chrome with its sandbox enabled.
    ///
    /// Default: `true`
    pub sandbox: bool,

    /// User agent presented to the site.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Browser window size in pixels.
    ///
    /// Default: `(1920, 1080)`
    pub window_size: (u32, u32),

    /// Dynamic content settling.
    pub settle: SettleOptions,

    /// Extraction and filter thresholds.
    pub thresholds: Thresholds,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            settle_wait: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(30),
            headless: true,
            sandbox: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: (1920, 1080),
            settle: SettleOptions::default(),
            thresholds: Thresholds::default(),
        }
    }
}
