//! # review-scraper
//!
//! Scrapes movie reviews from pages whose markup is not under our control.
//!
//! A page is rendered in headless Chrome, spoilers and truncated reviews are
//! expanded, and the snapshot is searched for review titles and bodies with
//! ordered fallbacks instead of a fixed schema. Reviews with too little text
//! are dropped before they reach a store.
//!
//! ## Quick Start
//!
//! ```rust
//! use review_scraper::{scrape, HtmlSource, ScrapeOptions};
//!
//! let html = r#"<div class="review-container">
//!     <a class="title">Layers upon layers</a>
//!     <div class="text show-more__control">Every rewatch reveals another clue hidden in plain sight.</div>
//! </div>"#;
//!
//! let options = ScrapeOptions {
//!     url: "https://example.com/reviews".to_string(),
//!     ..ScrapeOptions::default()
//! };
//! let report = scrape(&HtmlSource::from_html(html), &options)?;
//! assert_eq!(report.accepted.len(), 1);
//! assert_eq!(report.accepted[0].title(), "Layers upon layers");
//! # Ok::<(), review_scraper::Error>(())
//! ```
//!
//! Live pages go through [`ChromeLoader`] instead of [`HtmlSource`].
//!
//! ## Stages
//!
//! - **Loading**: [`loader`] renders and settles the page
//! - **Locating**: [`locator`] finds one subtree per review
//! - **Extracting**: [`extractor`] pulls title and body, or pairs review links
//!   with nearby text when no containers exist
//! - **Filtering**: [`filter()`] keeps bodies longer than 50 characters
//! - **Storing and cleaning**: [`store`] and [`clean`]

mod error;
mod options;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Parsed page snapshots.
pub mod document;

/// Selector candidate lists and lookup helpers.
pub mod selector;

/// Review container locator.
pub mod locator;

/// Title and body extraction.
pub mod extractor;

/// Length filter for extracted reviews.
pub mod filter;

/// Browser and saved-page loaders.
pub mod loader;

/// Review persistence.
pub mod store;

/// Text normalization for stored reviews.
pub mod clean;

/// Scrape pass orchestration.
pub mod pipeline;

// Public API - re-exports
pub use document::RenderedDocument;
pub use error::{Error, LoadError, Result, StepError};
pub use extractor::{extract_reviews, Extraction};
pub use filter::filter;
pub use loader::{ChromeLoader, DocumentSource, HtmlSource};
pub use locator::{locate, ReviewContainer};
pub use options::{
    ButtonMarkers, ScrapeOptions, SettleOptions, Thresholds, DEFAULT_URL, DEFAULT_USER_AGENT,
};
pub use pipeline::{scrape, scrape_document, scrape_into};
pub use result::{AcceptedReview, ExtractedReview, ScrapeReport, Strategy, MIN_ACCEPTED_TEXT_LEN};
pub use store::{JsonlStore, MemoryStore, ReviewStore, ScrapedRecord};
