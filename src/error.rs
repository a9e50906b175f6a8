//! Error types for review-scraper.
//!
//! Only load failures escape a scrape pass. Selector misses and failed page
//! interactions are absorbed where they happen and never show up here.

/// Failure to produce a rendered document.
///
/// Fatal to the whole scrape pass. The browser session has already been torn
/// down by the time a caller sees one of these.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The target URL could not be parsed.
    #[error("invalid target URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The target URL is not http or https.
    #[error("unsupported URL scheme {scheme:?} in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// Chrome could not be launched or a tab could not be opened.
    #[error("browser session failed to start: {0}")]
    SessionStart(String),

    /// Navigation to the target page failed or timed out.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The rendered HTML could not be read back from the page.
    #[error("page snapshot failed: {0}")]
    Snapshot(String),

    /// A saved HTML page could not be read from disk.
    #[error("failed to read saved page {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single dynamic-content interaction that did not go through.
///
/// Recovered locally by the settler; processing continues with the next
/// element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{action} failed: {reason}")]
pub struct StepError {
    /// What was being attempted (`"click"`, `"visibility check"`, ...).
    pub action: &'static str,
    /// Driver-provided failure description.
    pub reason: String,
}

impl StepError {
    pub fn new(action: &'static str, reason: impl std::fmt::Display) -> Self {
        Self {
            action,
            reason: reason.to_string(),
        }
    }
}

/// Error type for crate operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Reading or writing a record file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be encoded or decoded.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
