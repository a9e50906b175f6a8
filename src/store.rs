//! Review storage.
//!
//! Accepted reviews are handed to a [`ReviewStore`], which gives each one an
//! id and a timestamp. [`JsonlStore`] appends one JSON object per line to a
//! file; [`MemoryStore`] keeps records in a `Vec`.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::result::{AcceptedReview, ScrapeReport};

/// A stored scraped review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    pub id: u64,
    pub source_url: String,
    pub review_title: String,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

impl ScrapedRecord {
    fn new(id: u64, source_url: &str, review: &AcceptedReview) -> Self {
        Self {
            id,
            source_url: source_url.to_string(),
            review_title: review.title().to_string(),
            raw_text: review.text().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Destination for accepted reviews.
pub trait ReviewStore {
    /// Store one review scraped from `source_url`.
    ///
    /// # Errors
    ///
    /// Implementation-specific storage failures.
    fn save(&mut self, source_url: &str, review: &AcceptedReview) -> Result<ScrapedRecord>;
}

/// Save every accepted review of a pass, in order.
///
/// # Errors
///
/// Stops at the first storage failure; earlier records stay stored.
pub fn persist<S: ReviewStore + ?Sized>(report: &ScrapeReport, store: &mut S) -> Result<Vec<ScrapedRecord>> {
    report
        .accepted
        .iter()
        .map(|review| -> Result<ScrapedRecord> {
            let record = store.save(&report.source_url, review)?;
            tracing::debug!(
                id = record.id,
                "Saved review: {} | {}...",
                record.review_title,
                preview(&record.raw_text, PREVIEW_CHARS)
            );
            Ok(record)
        })
        .collect()
}

/// Characters of the body shown when a saved review is logged.
const PREVIEW_CHARS: usize = 100;

/// The first `max_chars` characters of `text`.
fn preview(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}

/// In-memory store; ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<ScrapedRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[ScrapedRecord] {
        &self.records
    }
}

impl ReviewStore for MemoryStore {
    fn save(&mut self, source_url: &str, review: &AcceptedReview) -> Result<ScrapedRecord> {
        let record = ScrapedRecord::new(self.records.len() as u64 + 1, source_url, review);
        self.records.push(record.clone());
        Ok(record)
    }
}

/// Append-only JSON-lines file store.
///
/// Ids continue from the largest id already in the file.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    next_id: u64,
}

impl JsonlStore {
    /// Open (without creating) the store at `path`.
    ///
    /// # Errors
    ///
    /// Fails if an existing file cannot be read or holds a malformed line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let existing: Vec<ScrapedRecord> = read_jsonl(&path)?;
        let next_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Ok(Self { path, next_id })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record currently in the file.
    ///
    /// # Errors
    ///
    /// Fails on read errors or malformed lines.
    pub fn records(&self) -> Result<Vec<ScrapedRecord>> {
        read_jsonl(&self.path)
    }
}

impl ReviewStore for JsonlStore {
    fn save(&mut self, source_url: &str, review: &AcceptedReview) -> Result<ScrapedRecord> {
        let record = ScrapedRecord::new(self.next_id, source_url, review);
        append_jsonl(&self.path, std::slice::from_ref(&record))?;
        self.next_id += 1;
        Ok(record)
    }
}

/// Read every record of a JSON-lines file. A missing file reads as empty;
/// blank lines are skipped.
///
/// # Errors
///
/// I/O failures and lines that do not decode as `T`.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Append records to a JSON-lines file, creating it if needed.
///
/// # Errors
///
/// I/O and serialization failures.
pub fn append_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{ExtractedReview, Strategy};

    fn accepted(title: &str) -> AcceptedReview {
        AcceptedReview::try_from(ExtractedReview::new(title, "v".repeat(64))).expect("long body")
    }

    #[test]
    fn memory_store_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let first = store.save("https://example.com", &accepted("a")).expect("saved");
        let second = store.save("https://example.com", &accepted("b")).expect("saved");

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.records()[1].review_title, "b");
    }

    #[test]
    fn persist_keeps_report_order_and_source() {
        let report = ScrapeReport {
            source_url: "https://example.com/reviews".to_string(),
            captured_at: Utc::now(),
            strategy: Strategy::Alternative,
            extracted: 3,
            accepted: vec![accepted("first"), accepted("second")],
        };
        let mut store = MemoryStore::new();

        let saved = persist(&report, &mut store).expect("persisted");
        let titles: Vec<&str> = saved.iter().map(|r| r.review_title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(saved.iter().all(|r| r.source_url == report.source_url));
    }

    #[test]
    fn preview_cuts_on_character_boundaries() {
        assert_eq!(preview("short", 100), "short");
        assert_eq!(preview("abcdef", 3), "abc");
        assert_eq!(preview("éééé", 2), "éé");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn missing_file_reads_empty() {
        let records: Vec<ScrapedRecord> =
            read_jsonl(Path::new("/no/such/dir/records.jsonl")).expect("missing is empty");
        assert!(records.is_empty());
    }
}
