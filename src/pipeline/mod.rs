//! Pipeline stages for PDF-to-text OCR.
//!
//! Each submodule implements exactly one step; the driver in
//! [`crate::convert`] strings them together.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ recognize (ocr × profiles) ──▶ assemble
//! (path)    (pdfium)   (tesseract, first non-empty)    (blocks)
//! ```
//!
//! 1. [`input`]     — validate the input path, derive the default output path
//! 2. [`render`]    — rasterise every page at the configured DPI
//! 3. [`ocr`]       — one engine call for one image under one profile
//! 4. [`recognize`] — ordered fallback across profiles
//! 5. [`assemble`]  — text cleanup and block assembly

pub mod assemble;
pub mod input;
pub mod ocr;
pub mod recognize;
pub mod render;
