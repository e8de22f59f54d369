//! File validation against the photo allow-list and size ceiling.
//!
//! The declared MIME type is authoritative when present. When it is
//! absent the filename extension is matched against the same set. A
//! file with neither a type nor an extension is accepted and treated
//! as JPEG downstream.

use super::IntakeError;

/// Size ceiling: files above this are rejected before any network call.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/heic",
    "image/heif",
    "image/png",
    "image/jpg",
    "image/jpeg",
];

const ALLOWED_EXTENSIONS: &[&str] = &["heic", "heif", "png", "jpg", "jpeg"];

/// Fallback content type when the client declared none.
const DEFAULT_MIME: &str = "image/jpeg";

/// An accepted photo, with the effective MIME type and extension used
/// for storage paths and upstream content-type headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    pub file_name: String,
    pub mime: String,
    pub extension: String,
}

/// Validate a selected file. `declared_mime` is the client-declared
/// content type, `None` (or empty) when absent or untrustworthy.
pub fn validate(
    file_name: &str,
    declared_mime: Option<&str>,
    len: usize,
) -> Result<ValidatedImage, IntakeError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(IntakeError::TooLarge { size: len });
    }

    let extension = extension_of(file_name);
    let declared = declared_mime.map(str::trim).filter(|m| !m.is_empty());

    match declared {
        Some(mime) => {
            if !ALLOWED_MIME_TYPES.contains(&mime) {
                return Err(IntakeError::UnsupportedFormat);
            }
        }
        None => {
            if let Some(ext) = &extension {
                if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
                    return Err(IntakeError::UnsupportedFormat);
                }
            }
        }
    }

    let mime = declared.map(str::to_string).unwrap_or_else(|| {
        extension
            .as_deref()
            .map(|ext| {
                mime_guess::from_ext(ext)
                    .first_raw()
                    .unwrap_or(DEFAULT_MIME)
                    .to_string()
            })
            .unwrap_or_else(|| DEFAULT_MIME.to_string())
    });

    Ok(ValidatedImage {
        file_name: file_name.to_string(),
        mime,
        extension: extension.unwrap_or_else(|| "jpg".to_string()),
    })
}

/// Lowercased filename extension, if any.
pub fn extension_of(file_name: &str) -> Option<String> {
    let ext = file_name.rsplit('.').next()?;
    if ext == file_name || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
