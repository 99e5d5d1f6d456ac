//! # pdf-chinese-ocr
//!
//! Recover Chinese (and fallback English) text from scanned PDFs.
//!
//! Each page is rasterised with pdfium at 300 DPI and handed to Tesseract
//! under a priority-ordered list of language profiles. The first profile
//! that yields any text wins; pages are concatenated into a plain UTF-8
//! text file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate path, derive <stem>_extracted.txt
//!  ├─ 2. Render     rasterise every page via pdfium (spawn_blocking)
//!  ├─ 3. Recognize  per page: chi_tra → chi_sim → eng+chi_tra → eng
//!  ├─ 4. Assemble   "\n" + text + "\n" blocks, joined by "\n"
//!  └─ 5. Output     write once, replacing any existing file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_chinese_ocr::{extract_to_file, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder().max_pages(20).build()?;
//!     let written = extract_to_file("document.pdf", None, &config).await?;
//!     eprintln!(
//!         "{} of {} pages had text → {}",
//!         written.output.stats.pages_with_text,
//!         written.output.stats.processed_pages,
//!         written.path.display()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Requirements
//!
//! - A pdfium shared library (working directory, system path, or `PDFIUM_LIB_PATH`).
//! - `tesseract` with the `chi_tra`, `chi_sim`, and `eng` language packs.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-chinese-ocr` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{EmptyPagePolicy, ExtractionConfig, ExtractionConfigBuilder, OcrProfile};
pub use convert::{
    extract, extract_sync, extract_to_file, extract_to_file_sync, extract_to_file_with, extract_with,
};
pub use error::{AttemptError, OcrToolError, RenderError};
pub use output::{ExtractionOutput, ExtractionStats, PageResult, WrittenOutput};
pub use pipeline::input::default_output_path;
pub use pipeline::ocr::{OcrEngine, TesseractEngine};
pub use pipeline::recognize::{Recognition, Recognizer};
pub use pipeline::render::{PageImage, PageRenderer, PdfiumRenderer};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
