//! Input checks shared by the pipeline operations. All of them run before any
//! remote call is made.

use psiagram_core::AppError;

/// Return a required field unchanged, or `InvalidRequest` when it is missing or
/// blank. Whitespace only counts for the blank check.
pub fn require_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidRequest(format!("{} is required", field))),
    }
}

/// A filename becomes the suffix of a staging key, so it must be a single path segment.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.contains('/') || filename.contains('\\') {
        return Err(AppError::InvalidRequest(format!(
            "filename must not contain path separators: {}",
            filename
        )));
    }
    if filename == "." || filename == ".." {
        return Err(AppError::InvalidRequest(format!(
            "filename is not valid: {}",
            filename
        )));
    }
    Ok(())
}
