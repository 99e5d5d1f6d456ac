//! Text cleanup and document assembly.
//!
//! [`clean_text`] normalises raw engine output before the recognizer decides
//! whether a profile produced anything. [`assemble_document`] turns per-page
//! results into the final file contents:
//!
//! ```text
//! block(page) = "\n" + text + "\n"               (default)
//!             | "=== Page N ===\n" + text + "\n"  (page markers)
//! document    = blocks joined by "\n"
//! ```
//!
//! so consecutive blocks are separated by a blank line.

use crate::config::{EmptyPagePolicy, ExtractionConfig};
use crate::output::PageResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Text substituted for empty pages under [`EmptyPagePolicy::Placeholder`].
pub const NO_TEXT_PLACEHOLDER: &str = "[No text detected]";

/// Normalise raw OCR output.
///
/// 1. CRLF / CR → LF
/// 2. Drop form feeds (tesseract ends each page with `\x0c`)
/// 3. Trim trailing whitespace per line
/// 4. Optionally collapse spaces between CJK ideographs
/// 5. Trim the whole text
pub fn clean_text(raw: &str, collapse_cjk_spaces: bool) -> String {
    let s = raw.replace("\r\n", "\n").replace('\r', "\n").replace('\x0c', "");
    let s = s
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    let s = if collapse_cjk_spaces {
        collapse_cjk_spacing(&s)
    } else {
        s
    };
    s.trim().to_string()
}

static RE_CJK_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\p{Han}\x{3001}-\x{303F}\x{FF01}-\x{FFEF}]) +([\p{Han}\x{3001}-\x{303F}\x{FF01}-\x{FFEF}])")
        .unwrap()
});

/// `中 文 字` → `中文字`. Spaces next to Latin text are kept.
fn collapse_cjk_spacing(input: &str) -> String {
    // Matches overlap on their shared character, so repeat until stable.
    let mut current = input.to_string();
    loop {
        let next = RE_CJK_GAP.replace_all(&current, "$1$2").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Render one page's block, or `None` when the page contributes nothing.
pub fn render_block(page: &PageResult, config: &ExtractionConfig) -> Option<String> {
    let text = if page.text.is_empty() {
        match config.empty_pages {
            EmptyPagePolicy::Skip => return None,
            EmptyPagePolicy::Placeholder => NO_TEXT_PLACEHOLDER,
        }
    } else {
        page.text.as_str()
    };

    Some(if config.page_markers {
        format!("=== Page {} ===\n{}\n", page.page_num, text)
    } else {
        format!("\n{}\n", text)
    })
}

/// Assemble the document from page results, in the order given.
pub fn assemble_document(pages: &[PageResult], config: &ExtractionConfig) -> String {
    pages
        .iter()
        .filter_map(|p| render_block(p, config))
        .collect::<Vec<_>>()
        .join("\n")
}
