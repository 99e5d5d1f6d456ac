//! End-to-end tests against a real pdfium library and tesseract install.
//!
//! They read PDFs from `./test_cases/` and are gated behind the
//! `E2E_ENABLED` environment variable so they do not run in CI unless
//! explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use pdf_chinese_ocr::{
    extract, extract_to_file, extract_to_file_sync, ExtractionConfig, OcrProfile, OcrToolError,
};
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if E2E_ENABLED is not set *or* no PDF file at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP — test file not found: {}", p.display());
            return;
        }
        p
    }};
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_traditional_chinese_scan() {
    let pdf = e2e_skip_unless_ready!(test_cases_dir().join("chi_tra_scan.pdf"));
    let config = ExtractionConfig::builder().max_pages(2).build().unwrap();

    let out = extract(&pdf, &config).await.expect("extraction failed");

    assert!(out.stats.processed_pages >= 1);
    assert!(out.has_text(), "expected text from a scanned page");
    for page in out.pages.iter().filter(|p| !p.text.is_empty()) {
        println!(
            "page {} via '{}': {} chars",
            page.page_num,
            page.profile.as_deref().unwrap_or("-"),
            page.chars
        );
    }
}

#[tokio::test]
async fn test_english_only_profile() {
    let pdf = e2e_skip_unless_ready!(test_cases_dir().join("english.pdf"));
    let config = ExtractionConfig::builder()
        .max_pages(1)
        .profiles(vec![OcrProfile::new("eng")])
        .build()
        .unwrap();

    let out = extract(&pdf, &config).await.expect("extraction failed");

    assert_eq!(out.stats.processed_pages, 1);
    assert!(out.text.starts_with('\n') || out.text.is_empty());
}

#[tokio::test]
async fn test_writes_output_file() {
    let pdf = e2e_skip_unless_ready!(test_cases_dir().join("chi_tra_scan.pdf"));
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("scan.txt");
    let config = ExtractionConfig::builder().max_pages(1).build().unwrap();

    let written = extract_to_file(&pdf, Some(&out_path), &config)
        .await
        .expect("extraction failed");

    let on_disk = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(on_disk, written.output.text);
}

#[test]
fn test_non_pdf_input_is_no_pages() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("not-a-pdf.pdf");
    std::fs::write(&bogus, "plain text, not a PDF").unwrap();
    let out_path = dir.path().join("out.txt");

    let err = extract_to_file_sync(&bogus, Some(&out_path), &ExtractionConfig::default())
        .unwrap_err();

    assert!(matches!(err, OcrToolError::NoPages { .. }), "got: {err:?}");
    assert!(!out_path.exists());
}
