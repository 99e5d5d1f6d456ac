//! PDF rasterisation: render every page to `DynamicImage` via pdfium.
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which is
//! blocking and CPU-bound, so the work runs on
//! `tokio::task::spawn_blocking`. The whole document is rendered up front;
//! the driver applies the page cap afterwards.
//!
//! PDF user space is 72 units per inch, so a page is scaled by `dpi / 72`
//! (300 DPI → ×4.17).

use crate::config::ExtractionConfig;
use crate::error::RenderError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a pdfium library file or the directory holding it.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// One rendered page.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-indexed page number.
    pub page_num: usize,
    pub image: DynamicImage,
}

/// Anything that can turn a PDF into an ordered list of page images.
pub trait PageRenderer {
    /// Render every page of `pdf_path` at `dpi`, in document order,
    /// numbering pages from 1.
    fn render(
        &self,
        pdf_path: &Path,
        dpi: u32,
    ) -> impl Future<Output = Result<Vec<PageImage>, RenderError>>;
}

/// The production renderer backed by pdfium.
#[derive(Clone, Default)]
pub struct PdfiumRenderer {
    password: Option<String>,
    max_rendered_pixels: Option<u32>,
    library_path: Option<PathBuf>,
}

impl fmt::Debug for PdfiumRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfiumRenderer")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("library_path", &self.library_path)
            .finish()
    }
}

impl PdfiumRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the password and pixel cap from `config`, and the library
    /// location from `PDFIUM_LIB_PATH` when set.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            password: config.password.clone(),
            max_rendered_pixels: config.max_rendered_pixels,
            library_path: std::env::var_os(PDFIUM_LIB_PATH_ENV).map(PathBuf::from),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }
}

impl PageRenderer for PdfiumRenderer {
    async fn render(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<PageImage>, RenderError> {
        let path = pdf_path.to_path_buf();
        let renderer = self.clone();

        tokio::task::spawn_blocking(move || renderer.render_blocking(&path, dpi))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))?
    }
}

impl PdfiumRenderer {
    fn render_blocking(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<PageImage>, RenderError> {
        let pdfium = bind_pdfium(self.library_path.as_deref())?;
        let password = self.password.as_deref();

        let document = pdfium
            .load_pdf_from_file(pdf_path, password)
            .map_err(|e| classify_load_error(format!("{:?}", e), password.is_some()))?;

        let pages = document.pages();
        let total_pages = pages.len() as usize;
        info!("PDF loaded: {} pages", total_pages);

        let mut render_config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);
        if let Some(px) = self.max_rendered_pixels {
            render_config = render_config
                .set_maximum_width(px as i32)
                .set_maximum_height(px as i32);
        }

        let mut results = Vec::with_capacity(total_pages);

        for (idx, page) in pages.iter().enumerate() {
            let page_num = idx + 1;
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| RenderError::Page {
                    page: page_num,
                    detail: format!("{:?}", e),
                })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                page_num,
                image.width(),
                image.height()
            );

            results.push(PageImage { page_num, image });
        }

        Ok(results)
    }
}

/// Bind to an explicit library path, else the working directory, else the system library.
fn bind_pdfium(library_path: Option<&Path>) -> Result<Pdfium, RenderError> {
    let bindings = match library_path {
        Some(path) if path.is_dir() => {
            let lib = Pdfium::pdfium_platform_library_name_at_path(path);
            Pdfium::bind_to_library(&lib)
        }
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_library(&Pdfium::pdfium_platform_library_name_at_path(
            Path::new("./"),
        ))
        .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| RenderError::Binding(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

/// pdfium reports password problems only through its error text.
fn classify_load_error(detail: String, password_given: bool) -> RenderError {
    if detail.contains("Password") || detail.contains("password") {
        if password_given {
            RenderError::WrongPassword
        } else {
            RenderError::PasswordRequired
        }
    } else {
        RenderError::Load(detail)
    }
}
