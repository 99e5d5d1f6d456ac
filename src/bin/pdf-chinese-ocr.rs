//! CLI binary for pdf-chinese-ocr.
//!
//! A thin shim over the library crate that maps positional arguments and
//! flags to `ExtractionConfig` and reports the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_chinese_ocr::{
    extract_to_file, EmptyPagePolicy, ExtractionConfig, ExtractionProgressCallback, OcrProfile,
    ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar plus a line per page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Spinner until `on_extraction_start` reveals the page count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Rendering");
        bar.set_message("Rasterising PDF pages…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    /// Stop drawing so an error message is not interleaved with the bar.
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("OCR");
        self.bar.reset_eta();
    }

    fn on_page_start(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total_pages: usize, chars: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total_pages,
            dim(&format!("{chars:>5} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_page_empty(&self, page_num: usize, total_pages: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            yellow("∅"),
            page_num,
            total_pages,
            dim("no text detected"),
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, _total_pages: usize, _with_text: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract to document_extracted.txt in the current directory
  pdf-chinese-ocr document.pdf

  # Explicit output file
  pdf-chinese-ocr document.pdf extracted_text.txt

  # Only the first 20 pages
  pdf-chinese-ocr document.pdf extracted_text.txt 20

  # Simplified Chinese first, then English
  pdf-chinese-ocr --lang chi_sim --lang eng scan.pdf

  # Keep page boundaries visible
  pdf-chinese-ocr --page-markers --placeholder scan.pdf

LANGUAGE FALLBACK (default, highest priority first):
  1. chi_tra        Traditional Chinese
  2. chi_sim        Simplified Chinese
  3. eng+chi_tra    English + Traditional Chinese
  4. eng            English
  The first profile producing any text wins for that page.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (file or directory)
  TESSDATA_PREFIX   Tesseract language data (or use --tessdata)
  RUST_LOG          Override the log filter
"#;

/// Extract Chinese text from scanned PDF pages with Tesseract OCR.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-chinese-ocr",
    version,
    about = "Extract Traditional/Simplified Chinese text from PDF page images",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF file.
    pdf_path: PathBuf,

    /// Output text file [default: <pdf-stem>_extracted.txt].
    output_path: Option<PathBuf>,

    /// Process at most this many pages, starting from page 1.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    max_pages: Option<u64>,

    /// Rendering DPI (72–600).
    #[arg(long, env = "PDF_OCR_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Tesseract language set to try, in order. Repeat to build a fallback chain.
    #[arg(long = "lang", value_name = "LANGS", env = "PDF_OCR_LANGS", value_delimiter = ',')]
    langs: Vec<String>,

    /// Tesseract OCR engine mode (0–3).
    #[arg(long, env = "PDF_OCR_OEM", default_value_t = 3,
          value_parser = clap::value_parser!(u8).range(0..=3))]
    oem: u8,

    /// Tesseract page segmentation mode (0–13).
    #[arg(long, env = "PDF_OCR_PSM", default_value_t = 6,
          value_parser = clap::value_parser!(u8).range(0..=13))]
    psm: u8,

    /// Path to the tesseract executable.
    #[arg(long, env = "PDF_OCR_TESSERACT")]
    tesseract: Option<PathBuf>,

    /// Tesseract language-data directory (exported as TESSDATA_PREFIX).
    #[arg(long, env = "PDF_OCR_TESSDATA")]
    tessdata: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF_OCR_PASSWORD")]
    password: Option<String>,

    /// Prefix every page block with "=== Page N ===".
    #[arg(long, env = "PDF_OCR_PAGE_MARKERS")]
    page_markers: bool,

    /// Emit "[No text detected]" for pages without text instead of skipping them.
    #[arg(long, env = "PDF_OCR_PLACEHOLDER")]
    placeholder: bool,

    /// Fail when no page yields any text.
    #[arg(long, env = "PDF_OCR_REQUIRE_TEXT")]
    require_text: bool,

    /// Remove spaces Tesseract inserts between Chinese characters.
    #[arg(long, env = "PDF_OCR_COLLAPSE_CJK_SPACES")]
    collapse_cjk_spaces: bool,

    /// Print a JSON summary (stats and per-page profile) to stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF_OCR_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs; --verbose brings them back.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let cli_progress = show_progress.then(CliProgressCallback::new_dynamic);
    let clear_progress = || {
        if let Some(ref cb) = cli_progress {
            cb.clear();
        }
    };
    let progress_cb: Option<ProgressCallback> = cli_progress
        .clone()
        .map(|cb| cb as Arc<dyn ExtractionProgressCallback>);

    let config = build_config(&cli, progress_cb).inspect_err(|_| clear_progress())?;

    // ── Run extraction ───────────────────────────────────────────────────
    let written = extract_to_file(&cli.pdf_path, cli.output_path.as_deref(), &config)
        .await
        .inspect_err(|_| clear_progress())
        .with_context(|| format!("Failed to extract text from {}", cli.pdf_path.display()))?;

    let stats = &written.output.stats;

    if cli.json {
        let pages: Vec<_> = written
            .output
            .pages
            .iter()
            .map(|p| {
                serde_json::json!({
                    "page": p.page_num,
                    "chars": p.chars,
                    "profile": p.profile,
                    "failures": p.failures.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "output": written.path,
            "stats": stats,
            "pages": pages,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {}/{} pages with text  {}ms  →  {}",
            if stats.pages_with_text > 0 {
                green("✔")
            } else {
                yellow("⚠")
            },
            stats.pages_with_text,
            stats.processed_pages,
            stats.total_duration_ms,
            bold(&written.path.display().to_string()),
        );
        if stats.pages_with_text == 0 {
            eprintln!(
                "   {}",
                yellow("No text was recognised; the output file is empty (use --require-text to fail instead).")
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let profiles = build_profiles(&cli.langs, cli.oem, cli.psm);

    let mut builder = ExtractionConfig::builder()
        .dpi(cli.dpi)
        .profiles(profiles)
        .page_markers(cli.page_markers)
        .empty_pages(if cli.placeholder {
            EmptyPagePolicy::Placeholder
        } else {
            EmptyPagePolicy::Skip
        })
        .require_text(cli.require_text)
        .collapse_cjk_spaces(cli.collapse_cjk_spaces);

    if let Some(n) = cli.max_pages {
        let n = usize::try_from(n).context("max-pages is too large")?;
        builder = builder.max_pages(n);
    }
    if let Some(ref bin) = cli.tesseract {
        builder = builder.tesseract_binary(bin);
    }
    if let Some(ref dir) = cli.tessdata {
        builder = builder.tessdata_dir(dir);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// `--lang` values in order, or the default chain; `--oem`/`--psm` apply to all.
fn build_profiles(langs: &[String], oem: u8, psm: u8) -> Vec<OcrProfile> {
    let base = if langs.is_empty() {
        OcrProfile::default_chain()
    } else {
        langs.iter().map(|l| OcrProfile::new(l.trim())).collect()
    };
    base.into_iter()
        .map(|p| p.with_oem(oem).with_psm(psm))
        .collect()
}
