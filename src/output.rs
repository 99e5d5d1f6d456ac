//! Result types returned by the extraction entry points.

use crate::error::AttemptError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything produced by one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// The assembled document text, exactly as written to the output file.
    pub text: String,
    /// One entry per processed page, in page order.
    pub pages: Vec<PageResult>,
    pub stats: ExtractionStats,
}

impl ExtractionOutput {
    /// Whether at least one page yielded text.
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| !p.text.is_empty())
    }
}

/// An [`ExtractionOutput`] that has been written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenOutput {
    /// Where the text was written.
    pub path: PathBuf,
    pub output: ExtractionOutput,
}

/// Outcome of recognising a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Cleaned, trimmed text. Empty when no profile produced any.
    pub text: String,
    /// The profile that produced `text`, e.g. `--oem 3 --psm 6 -l chi_tra`.
    pub profile: Option<String>,
    /// Character count of `text`.
    pub chars: usize,
    /// Profiles that failed outright before one succeeded (or all ran out).
    pub failures: Vec<AttemptError>,
    pub duration_ms: u64,
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the rendered document.
    pub total_pages: usize,
    /// Pages handed to the recognizer (`min(max_pages, total_pages)`).
    pub processed_pages: usize,
    pub pages_with_text: usize,
    pub empty_pages: usize,
    /// Individual profile attempts that errored.
    pub failed_attempts: usize,
    pub render_duration_ms: u64,
    pub ocr_duration_ms: u64,
    pub total_duration_ms: u64,
}
