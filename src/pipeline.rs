//! Scrape pass orchestration.
//!
//! load → settle → locate → extract → filter, with persistence as an optional
//! last step.

use crate::document::RenderedDocument;
use crate::error::Result;
use crate::extractor::extract_reviews;
use crate::filter::filter_with_min_len;
use crate::loader::{validate_url, DocumentSource};
use crate::options::{ScrapeOptions, Thresholds};
use crate::result::ScrapeReport;
use crate::store::{persist, ReviewStore, ScrapedRecord};

/// Extract and filter reviews from an already rendered page.
#[must_use]
pub fn scrape_document(doc: &RenderedDocument, thresholds: &Thresholds) -> ScrapeReport {
    let extraction = extract_reviews(doc, thresholds);
    let extracted = extraction.reviews.len();
    let accepted = filter_with_min_len(extraction.reviews, thresholds.min_text_len);

    tracing::info!(
        strategy = ?extraction.strategy,
        extracted,
        accepted = accepted.len(),
        "Successfully scraped {} reviews with titles",
        accepted.len()
    );

    ScrapeReport {
        source_url: doc.url().to_string(),
        captured_at: doc.captured_at(),
        strategy: extraction.strategy,
        extracted,
        accepted,
    }
}

/// Run one scrape pass against `options.url`.
///
/// # Errors
///
/// Load failures only; extraction and filtering cannot fail.
pub fn scrape<S: DocumentSource + ?Sized>(source: &S, options: &ScrapeOptions) -> Result<ScrapeReport> {
    validate_url(&options.url)?;
    let doc = source.load(&options.url)?;
    Ok(scrape_document(&doc, &options.thresholds))
}

/// Run one scrape pass and hand every accepted review to `store`.
///
/// # Errors
///
/// Load failures and storage failures.
pub fn scrape_into<S, T>(source: &S, options: &ScrapeOptions, store: &mut T) -> Result<Vec<ScrapedRecord>>
where
    S: DocumentSource + ?Sized,
    T: ReviewStore + ?Sized,
{
    let report = scrape(source, options)?;
    let records = persist(&report, store)?;
    tracing::debug!(saved = records.len(), "reviews persisted");
    Ok(records)
}
