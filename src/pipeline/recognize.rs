//! Ordered-fallback recognition of a single page.
//!
//! Profiles are tried strictly in priority order. The first profile whose
//! cleaned text is non-empty wins and no later profile is invoked. A profile
//! that errors is recorded and skipped, never retried.

use crate::config::OcrProfile;
use crate::error::AttemptError;
use crate::pipeline::assemble::clean_text;
use crate::pipeline::ocr::OcrEngine;
use image::DynamicImage;
use tracing::{debug, warn};

/// The outcome of recognising one image.
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    /// Cleaned text of the winning profile, or empty.
    pub text: String,
    /// The winning profile.
    pub profile: Option<OcrProfile>,
    /// Errors from profiles tried before the winner (or all of them).
    pub failures: Vec<AttemptError>,
}

impl Recognition {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Runs an [`OcrEngine`] over a priority-ordered profile list.
#[derive(Debug, Clone)]
pub struct Recognizer<E> {
    engine: E,
    profiles: Vec<OcrProfile>,
    collapse_cjk_spaces: bool,
}

impl<E: OcrEngine> Recognizer<E> {
    pub fn new(engine: E, profiles: Vec<OcrProfile>) -> Self {
        Self {
            engine,
            profiles,
            collapse_cjk_spaces: false,
        }
    }

    pub fn collapse_cjk_spaces(mut self, v: bool) -> Self {
        self.collapse_cjk_spaces = v;
        self
    }

    pub fn profiles(&self) -> &[OcrProfile] {
        &self.profiles
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Recognise `image`, returning the first non-empty profile result.
    pub async fn recognize(&self, page_num: usize, image: &DynamicImage) -> Recognition {
        let mut failures = Vec::new();

        for profile in &self.profiles {
            match self.engine.recognize(image, profile).await {
                Ok(raw) => {
                    let text = clean_text(&raw, self.collapse_cjk_spaces);
                    if !text.is_empty() {
                        debug!(
                            "Page {}: '{}' produced {} chars",
                            page_num,
                            profile,
                            text.chars().count()
                        );
                        return Recognition {
                            text,
                            profile: Some(profile.clone()),
                            failures,
                        };
                    }
                    debug!("Page {}: '{}' produced no text", page_num, profile);
                }
                Err(e) => {
                    warn!("Page {}: OCR profile '{}' failed: {}", page_num, profile, e);
                    failures.push(e);
                }
            }
        }

        Recognition {
            text: String::new(),
            profile: None,
            failures,
        }
    }
}
