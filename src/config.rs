//! Configuration types for PDF OCR extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The OCR fallback order is plain data
//! ([`ExtractionConfig::profiles`]) so callers and tests can replace it
//! without touching the recognizer.

use crate::error::OcrToolError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Tesseract engine mode used by the default profiles (LSTM + legacy, whichever is available).
pub const DEFAULT_OEM: u8 = 3;

/// Tesseract page segmentation mode used by the default profiles (single uniform block).
pub const DEFAULT_PSM: u8 = 6;

/// Configuration for a PDF OCR extraction run.
///
/// # Example
/// ```rust
/// use pdf_chinese_ocr::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .dpi(300)
///     .max_pages(20)
///     .page_markers(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_pages, Some(20));
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 72–600. Default: 300.
    pub dpi: u32,

    /// Optional cap on the longest edge of a rendered page, in pixels. Default: None.
    pub max_rendered_pixels: Option<u32>,

    /// Process at most this many pages, starting from page 1. Default: all pages.
    pub max_pages: Option<usize>,

    /// OCR profiles in priority order. The first one yielding text wins.
    pub profiles: Vec<OcrProfile>,

    /// Path to the `tesseract` executable. If None, `tesseract` is looked up on `PATH`.
    pub tesseract_binary: Option<PathBuf>,

    /// Directory containing `*.traineddata`; exported as `TESSDATA_PREFIX`.
    pub tessdata_dir: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Prefix each page block with `=== Page N ===`. Default: false.
    pub page_markers: bool,

    /// What an empty page contributes to the output. Default: [`EmptyPagePolicy::Skip`].
    pub empty_pages: EmptyPagePolicy,

    /// Fail with [`OcrToolError::NoTextRecognized`] when no page yields text. Default: false.
    ///
    /// Off by default: an all-empty run still writes an (empty) file and
    /// reports success, only logging a warning.
    pub require_text: bool,

    /// Remove the single spaces tesseract inserts between CJK ideographs. Default: false.
    pub collapse_cjk_spaces: bool,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_rendered_pixels: None,
            max_pages: None,
            profiles: OcrProfile::default_chain(),
            tesseract_binary: None,
            tessdata_dir: None,
            password: None,
            page_markers: false,
            empty_pages: EmptyPagePolicy::default(),
            require_text: false,
            collapse_cjk_spaces: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("max_pages", &self.max_pages)
            .field("profiles", &self.profiles)
            .field("tesseract_binary", &self.tesseract_binary)
            .field("tessdata_dir", &self.tessdata_dir)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("page_markers", &self.page_markers)
            .field("empty_pages", &self.empty_pages)
            .field("require_text", &self.require_text)
            .field("collapse_cjk_spaces", &self.collapse_cjk_spaces)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Number of pages to process for a document of `total_pages` pages.
    pub fn pages_to_process(&self, total_pages: usize) -> usize {
        match self.max_pages {
            Some(cap) => cap.min(total_pages),
            None => total_pages,
        }
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl fmt::Debug for ExtractionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ExtractionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = Some(px.max(100));
        self
    }

    pub fn max_pages(mut self, n: usize) -> Self {
        self.config.max_pages = Some(n);
        self
    }

    /// Replace the whole profile chain. Order is priority.
    pub fn profiles(mut self, profiles: Vec<OcrProfile>) -> Self {
        self.config.profiles = profiles;
        self
    }

    pub fn tesseract_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tesseract_binary = Some(path.into());
        self
    }

    pub fn tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tessdata_dir = Some(dir.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn page_markers(mut self, v: bool) -> Self {
        self.config.page_markers = v;
        self
    }

    pub fn empty_pages(mut self, policy: EmptyPagePolicy) -> Self {
        self.config.empty_pages = policy;
        self
    }

    pub fn require_text(mut self, v: bool) -> Self {
        self.config.require_text = v;
        self
    }

    pub fn collapse_cjk_spaces(mut self, v: bool) -> Self {
        self.config.collapse_cjk_spaces = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, OcrToolError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(OcrToolError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.max_pages == Some(0) {
            return Err(OcrToolError::InvalidConfig(
                "max_pages must be a positive integer".into(),
            ));
        }
        if c.profiles.is_empty() {
            return Err(OcrToolError::InvalidConfig(
                "At least one OCR profile is required".into(),
            ));
        }
        for p in &c.profiles {
            p.validate()?;
        }
        Ok(self.config)
    }
}

// ── OCR profiles ─────────────────────────────────────────────────────────

/// One OCR configuration: a language set plus engine and segmentation modes.
///
/// `Display` renders the conventional tesseract argument string, e.g.
/// `--oem 3 --psm 6 -l chi_tra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrProfile {
    /// `+`-joined tesseract language codes, e.g. `eng+chi_tra`.
    pub languages: String,
    /// OCR engine mode (0–3).
    pub oem: u8,
    /// Page segmentation mode (0–13).
    pub psm: u8,
}

impl OcrProfile {
    /// A profile with the default engine and segmentation modes.
    pub fn new(languages: impl Into<String>) -> Self {
        Self {
            languages: languages.into(),
            oem: DEFAULT_OEM,
            psm: DEFAULT_PSM,
        }
    }

    pub fn with_oem(mut self, oem: u8) -> Self {
        self.oem = oem;
        self
    }

    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    /// Traditional Chinese, Simplified Chinese, English + Traditional Chinese, English.
    pub fn default_chain() -> Vec<OcrProfile> {
        ["chi_tra", "chi_sim", "eng+chi_tra", "eng"]
            .into_iter()
            .map(OcrProfile::new)
            .collect()
    }

    /// Command-line arguments for the tesseract binary, after `<image> stdout`.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
            "-l".to_string(),
            self.languages.clone(),
        ]
    }

    fn validate(&self) -> Result<(), OcrToolError> {
        if self.languages.trim().is_empty()
            || self.languages.split('+').any(|l| l.trim().is_empty())
        {
            return Err(OcrToolError::InvalidConfig(format!(
                "Invalid OCR language set '{}'",
                self.languages
            )));
        }
        if self.oem > 3 {
            return Err(OcrToolError::InvalidConfig(format!(
                "OCR engine mode must be 0–3, got {}",
                self.oem
            )));
        }
        if self.psm > 13 {
            return Err(OcrToolError::InvalidConfig(format!(
                "Page segmentation mode must be 0–13, got {}",
                self.psm
            )));
        }
        Ok(())
    }
}

impl fmt::Display for OcrProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--oem {} --psm {} -l {}", self.oem, self.psm, self.languages)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// What a page with no recognised text contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyPagePolicy {
    /// Contribute nothing, not even a separator. (default)
    #[default]
    Skip,
    /// Contribute a `[No text detected]` block.
    Placeholder,
}
