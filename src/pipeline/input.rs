//! Input validation and output-path derivation.
//!
//! Validation runs before anything is rendered, so a bad path never leaves
//! an output file behind.

use crate::error::OcrToolError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to the input stem when no output path is given.
pub const OUTPUT_SUFFIX: &str = "_extracted.txt";

/// Check that `path` names an existing, readable regular file.
pub fn validate_input(path: &Path) -> Result<(), OcrToolError> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(OcrToolError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(OcrToolError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    if !meta.is_file() {
        return Err(OcrToolError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Check read permission by attempting to open
    if let Err(e) = std::fs::File::open(path) {
        return Err(if e.kind() == std::io::ErrorKind::PermissionDenied {
            OcrToolError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            OcrToolError::FileNotFound {
                path: path.to_path_buf(),
            }
        });
    }

    debug!("Validated input PDF: {}", path.display());
    Ok(())
}

/// `<input-stem>_extracted.txt`, relative to the working directory.
///
/// The input's directory is deliberately dropped: `scans/report.pdf`
/// yields `report_extracted.txt`, not `scans/report_extracted.txt`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());
    PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}"))
}
