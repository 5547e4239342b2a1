//! Write rendered artifacts (PDF report, PNG chart) to disk.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Write an artifact byte buffer to `path`.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes)
        .map_err(|e| AppError::input(format!("Failed to write '{}': {e}", path.display())))
}
