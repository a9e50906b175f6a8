//! Content Loading
//!
//! Anything that can turn a URL into a [`RenderedDocument`] is a
//! [`DocumentSource`]. [`ChromeLoader`] renders live pages in headless
//! Chrome; [`HtmlSource`] serves a page that was saved earlier.

pub mod browser;
pub mod settle;

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::document::RenderedDocument;
use crate::error::LoadError;

pub use browser::{BrowserSession, ChromeLoader};
pub use settle::{settle, PageSession, SettleReport};

/// Produces a rendered document for a URL.
pub trait DocumentSource {
    /// Load `url` and return its rendered document.
    ///
    /// # Errors
    ///
    /// Any `LoadError`; the pass cannot continue without a document.
    fn load(&self, url: &str) -> Result<RenderedDocument, LoadError>;
}

/// Check that `url` is an absolute http(s) URL.
///
/// # Errors
///
/// `LoadError::InvalidUrl` when it does not parse,
/// `LoadError::UnsupportedScheme` when the scheme is not http or https.
pub fn validate_url(url: &str) -> Result<Url, LoadError> {
    let parsed = Url::parse(url).map_err(|source| LoadError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LoadError::UnsupportedScheme {
            url: url.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }
    Ok(parsed)
}

enum Saved {
    Html(String),
    File(PathBuf),
}

/// A page captured earlier, served as if it had just been rendered.
///
/// The URL passed to `load` is recorded as the document's source; the
/// content is always the saved page.
pub struct HtmlSource {
    saved: Saved,
}

impl HtmlSource {
    /// Serve an in-memory HTML string.
    #[must_use]
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            saved: Saved::Html(html.into()),
        }
    }

    /// Serve a saved HTML file, read on each load.
    #[must_use]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            saved: Saved::File(path.as_ref().to_path_buf()),
        }
    }
}

impl DocumentSource for HtmlSource {
    fn load(&self, url: &str) -> Result<RenderedDocument, LoadError> {
        match &self.saved {
            Saved::Html(html) => Ok(RenderedDocument::from_html(url, html)),
            Saved::File(path) => {
                let bytes = fs::read(path).map_err(|source| LoadError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved page read");
                Ok(RenderedDocument::from_bytes(url, &bytes))
            }
        }
    }
}
