//! Extraction entry points.
//!
//! The run is a single linear progression:
//!
//! ```text
//! validate ──▶ render ──▶ recognize page 1..=n ──▶ write
//! ```
//!
//! Validation, rendering and writing can end the run early with an
//! [`OcrToolError`]; recognition failures never do. Pages are recognised
//! strictly one at a time, in ascending order.
//!
//! The `*_with` variants take the renderer and engine as parameters; the
//! plain variants build [`PdfiumRenderer`] and [`TesseractEngine`] from the
//! config.

use crate::config::ExtractionConfig;
use crate::error::OcrToolError;
use crate::output::{ExtractionOutput, ExtractionStats, PageResult, WrittenOutput};
use crate::pipeline::assemble::assemble_document;
use crate::pipeline::input::{default_output_path, validate_input};
use crate::pipeline::ocr::{OcrEngine, TesseractEngine};
use crate::pipeline::recognize::Recognizer;
use crate::pipeline::render::{PageRenderer, PdfiumRenderer};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Extract text from a PDF using pdfium and the tesseract CLI.
///
/// # Errors
/// - input missing / not a file / unreadable
/// - no pages rendered
/// - no text at all when `config.require_text` is set
pub async fn extract(
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, OcrToolError> {
    let renderer = PdfiumRenderer::from_config(config);
    let engine = TesseractEngine::from_config(config);
    extract_with(&renderer, &engine, input, config).await
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, OcrToolError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| OcrToolError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(input, config))
}

/// Extract text and write it to `output`, or to `<stem>_extracted.txt` in
/// the working directory when `output` is `None`.
pub async fn extract_to_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ExtractionConfig,
) -> Result<WrittenOutput, OcrToolError> {
    let renderer = PdfiumRenderer::from_config(config);
    let engine = TesseractEngine::from_config(config);
    extract_to_file_with(&renderer, &engine, input, output, config).await
}

/// Synchronous wrapper around [`extract_to_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_to_file_sync(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ExtractionConfig,
) -> Result<WrittenOutput, OcrToolError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| OcrToolError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract_to_file(input, output, config))
}

/// Run the pipeline with an explicit renderer and OCR engine.
pub async fn extract_with<R, E>(
    renderer: &R,
    engine: &E,
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, OcrToolError>
where
    R: PageRenderer,
    E: OcrEngine,
{
    let total_start = Instant::now();
    let pdf_path = input.as_ref();
    info!("Processing PDF: {}", pdf_path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    validate_input(pdf_path)?;

    // ── Step 2: Rasterise every page ─────────────────────────────────────
    let render_start = Instant::now();
    let rendered = match renderer.render(pdf_path, config.dpi).await {
        Ok(pages) => pages,
        Err(e) => {
            error!("Error converting PDF to images: {}", e);
            return Err(OcrToolError::NoPages {
                path: pdf_path.to_path_buf(),
                detail: e.to_string(),
            });
        }
    };
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    if rendered.is_empty() {
        error!("No pages rendered from {}", pdf_path.display());
        return Err(OcrToolError::NoPages {
            path: pdf_path.to_path_buf(),
            detail: "document produced no page images".to_string(),
        });
    }

    let total_pages = rendered.len();
    let to_process = config.pages_to_process(total_pages);
    info!(
        "Rendered {} pages in {}ms; processing {}",
        total_pages, render_duration_ms, to_process
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(to_process);
    }

    // ── Step 3: Recognise pages in order ─────────────────────────────────
    let recognizer = Recognizer::new(engine, config.profiles.clone())
        .collapse_cjk_spaces(config.collapse_cjk_spaces);

    let ocr_start = Instant::now();
    let mut pages: Vec<PageResult> = Vec::with_capacity(to_process);

    for page in rendered.into_iter().take(to_process) {
        let page_num = page.page_num;
        debug!("Processing page {}...", page_num);
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, to_process);
        }

        let start = Instant::now();
        let recognition = recognizer.recognize(page_num, &page.image).await;
        let chars = recognition.text.chars().count();

        if let Some(ref cb) = config.progress_callback {
            if recognition.is_empty() {
                cb.on_page_empty(page_num, to_process);
            } else {
                cb.on_page_complete(page_num, to_process, chars);
            }
        }

        pages.push(PageResult {
            page_num,
            chars,
            profile: recognition.profile.as_ref().map(|p| p.to_string()),
            text: recognition.text,
            failures: recognition.failures,
            duration_ms: start.elapsed().as_millis() as u64,
        });
    }
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    let pages_with_text = pages.iter().filter(|p| !p.text.is_empty()).count();

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(to_process, pages_with_text);
    }

    if pages_with_text == 0 {
        if config.require_text {
            return Err(OcrToolError::NoTextRecognized { pages: to_process });
        }
        warn!(
            "No text recognised on any of the {} processed pages; output will be empty",
            to_process
        );
    }

    // ── Step 4: Assemble ─────────────────────────────────────────────────
    let text = assemble_document(&pages, config);

    let stats = ExtractionStats {
        total_pages,
        processed_pages: pages.len(),
        pages_with_text,
        empty_pages: pages.len() - pages_with_text,
        failed_attempts: pages.iter().map(|p| p.failures.len()).sum(),
        render_duration_ms,
        ocr_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {}/{} pages with text, {}ms total",
        pages_with_text, stats.processed_pages, stats.total_duration_ms
    );

    Ok(ExtractionOutput { text, pages, stats })
}

/// [`extract_with`], then write the text to disk.
///
/// The output path is resolved (defaulting to `<stem>_extracted.txt`)
/// before any work happens, and nothing is written unless every earlier
/// step succeeded. An existing file at the path is replaced.
pub async fn extract_to_file_with<R, E>(
    renderer: &R,
    engine: &E,
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ExtractionConfig,
) -> Result<WrittenOutput, OcrToolError>
where
    R: PageRenderer,
    E: OcrEngine,
{
    let input = input.as_ref();
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    info!("Output file: {}", path.display());

    let output = extract_with(renderer, engine, input, config).await?;

    write_output(&path, &output.text).await?;
    info!("Text extraction completed. Saved to: {}", path.display());

    Ok(WrittenOutput { path, output })
}

/// Write `text` as UTF-8, replacing `path` in one step.
async fn write_output(path: &Path, text: &str) -> Result<(), OcrToolError> {
    let target = path.to_path_buf();
    let text = text.to_owned();
    tokio::task::spawn_blocking(move || persist_text(&target, &text))
        .await
        .map_err(|e| OcrToolError::Internal(format!("Output writer task failed: {}", e)))?
}

/// The temp file lives beside `path` under a unique name and is removed
/// on drop unless it was persisted.
fn persist_text(path: &Path, text: &str) -> Result<(), OcrToolError> {
    let write_err = |source: std::io::Error| OcrToolError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".pdf-chinese-ocr-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_output_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content that is longer").unwrap();

        write_output(&path, "\n新內容\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\n新內容\n");
        assert_eq!(dir_entries(dir.path()), vec!["out.txt".to_string()]);
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn write_output_leaves_neighbouring_tmp_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let neighbour = dir.path().join("out.txt.tmp");
        std::fs::write(&neighbour, "user data").unwrap();

        write_output(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&neighbour).unwrap(), "user data");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(
            dir_entries(dir.path()),
            vec!["out.txt".to_string(), "out.txt.tmp".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_persist_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let path = dir.path().join("out.txt");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = write_output(&path, "text").await.unwrap_err();

        assert!(matches!(err, OcrToolError::OutputWriteFailed { .. }));
        assert_eq!(dir_entries(dir.path()), vec!["out.txt".to_string()]);
    }

    #[test]
    fn extract_sync_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_sync(dir.path().join("absent.pdf"), &ExtractionConfig::default())
            .unwrap_err();
        assert!(matches!(err, OcrToolError::FileNotFound { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn write_output_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.txt");

        let err = write_output(&path, "text").await.unwrap_err();
        assert!(matches!(err, OcrToolError::OutputWriteFailed { .. }));
    }
}
