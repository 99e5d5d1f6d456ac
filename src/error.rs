//! Error types for the pdf-chinese-ocr library.
//!
//! Three error types map onto three stages of the pipeline:
//!
//! * [`OcrToolError`] — **Fatal**: the run cannot produce an output file
//!   (missing input, nothing rendered, output not writable). Returned as
//!   `Err(OcrToolError)` from the top-level `extract*` functions.
//!
//! * [`RenderError`] — returned by a [`crate::pipeline::render::PageRenderer`].
//!   The driver logs the cause and converts it into
//!   [`OcrToolError::NoPages`].
//!
//! * [`AttemptError`] — **Non-fatal**: one OCR profile failed on one page.
//!   Stored inside [`crate::output::PageResult`]; the recognizer moves on to
//!   the next profile.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf-chinese-ocr library.
#[derive(Debug, Error)]
pub enum OcrToolError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input path exists but is a directory or other non-file.
    #[error("Input is not a file: '{path}'")]
    NotAFile { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// Rendering failed or the document has no pages.
    #[error("No pages could be rendered from '{path}': {detail}")]
    NoPages { path: PathBuf, detail: String },

    // ── Recognition errors ────────────────────────────────────────────────
    /// Every processed page came back empty and `require_text` is set.
    #[error("No text was recognised on any of the {pages} processed pages")]
    NoTextRecognized { pages: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a [`crate::pipeline::render::PageRenderer`] produced no pages.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or place the library in the working directory."
    )]
    Binding(String),

    /// PDF header/trailer/xref is corrupt or the format is unsupported.
    #[error("PDF could not be loaded: {0}")]
    Load(String),

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password (use --password)")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// pdfium returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    Page { page: usize, detail: String },

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

/// A non-fatal failure of one OCR profile on one page.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum AttemptError {
    /// The OCR binary could not be started at all.
    #[error("could not start '{binary}': {detail}")]
    EngineUnavailable { binary: String, detail: String },

    /// The engine ran but exited unsuccessfully (e.g. missing language pack).
    #[error("OCR profile '{profile}' failed: {stderr}")]
    EngineFailed { profile: String, stderr: String },

    /// The page image could not be encoded for the engine.
    #[error("could not encode page image: {detail}")]
    ImageEncode { detail: String },

    /// Temporary file handling failed.
    #[error("I/O error during OCR: {detail}")]
    Io { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_display_carries_cause() {
        let e = OcrToolError::NoPages {
            path: PathBuf::from("scan.pdf"),
            detail: RenderError::Load("bad xref".into()).to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("scan.pdf"), "got: {msg}");
        assert!(msg.contains("bad xref"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_exposes_source() {
        use std::error::Error as _;
        let e = OcrToolError::OutputWriteFailed {
            path: PathBuf::from("/root/out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/root/out.txt"));
        assert!(e.source().is_some());
    }

    #[test]
    fn attempt_error_display() {
        let e = AttemptError::EngineFailed {
            profile: "--oem 3 --psm 6 -l chi_tra".into(),
            stderr: "Failed loading language 'chi_tra'".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("chi_tra"), "got: {msg}");
    }

    #[test]
    fn page_render_error_display() {
        let e = RenderError::Page {
            page: 4,
            detail: "out of memory".into(),
        };
        assert!(e.to_string().contains("page 4"));
    }
}
