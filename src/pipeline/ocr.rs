//! OCR engines: one call = one page image under one [`OcrProfile`].
//!
//! [`TesseractEngine`] shells out to the `tesseract` CLI. The page is written
//! as a lossless PNG into a private temp directory (removed when the call
//! returns) and the recognised text is read back from stdout.

use crate::config::{ExtractionConfig, OcrProfile};
use crate::error::AttemptError;
use image::DynamicImage;
use std::future::Future;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Default executable name looked up on `PATH`.
pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";

/// A recognition backend.
pub trait OcrEngine {
    /// Recognise `image` with the languages and modes in `profile`.
    ///
    /// Returns the raw engine text; an empty string is a valid "no text" answer,
    /// not an error.
    fn recognize(
        &self,
        image: &DynamicImage,
        profile: &OcrProfile,
    ) -> impl Future<Output = Result<String, AttemptError>>;
}

impl<E: OcrEngine> OcrEngine for &E {
    fn recognize(
        &self,
        image: &DynamicImage,
        profile: &OcrProfile,
    ) -> impl Future<Output = Result<String, AttemptError>> {
        (**self).recognize(image, profile)
    }
}

/// Tesseract CLI wrapper.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    tessdata_dir: Option<PathBuf>,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_TESSERACT_BINARY),
            tessdata_dir: None,
        }
    }
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            binary: config
                .tesseract_binary
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TESSERACT_BINARY)),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    fn build_command(&self, image_path: &std::path::Path, profile: &OcrProfile) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(image_path).arg("stdout").args(profile.to_args());
        if let Some(ref dir) = self.tessdata_dir {
            cmd.env("TESSDATA_PREFIX", dir);
        }
        cmd.kill_on_drop(true);
        cmd
    }
}

impl OcrEngine for TesseractEngine {
    async fn recognize(
        &self,
        image: &DynamicImage,
        profile: &OcrProfile,
    ) -> Result<String, AttemptError> {
        let tmpdir = tempfile::Builder::new()
            .prefix("pdf-chinese-ocr")
            .tempdir()
            .map_err(|e| AttemptError::Io {
                detail: format!("cannot create temp dir: {e}"),
            })?;
        let input_path = tmpdir.path().join("page.png");

        image
            .save_with_format(&input_path, image::ImageFormat::Png)
            .map_err(|e| AttemptError::ImageEncode {
                detail: e.to_string(),
            })?;

        debug!(
            "Running {} {} stdout {}",
            self.binary.display(),
            input_path.display(),
            profile
        );

        let output = self
            .build_command(&input_path, profile)
            .output()
            .await
            .map_err(|e| AttemptError::EngineUnavailable {
                binary: self.binary.display().to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AttemptError::EngineFailed {
                profile: profile.to_string(),
                stderr: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
