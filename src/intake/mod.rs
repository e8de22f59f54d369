//! Image intake — validates a user-selected photo before anything
//! touches the network, manages the preview resource, and carries the
//! pre-staged handoff between the entry screen and the intake screen.

pub mod preview;
pub mod staged;
pub mod validate;

pub use preview::{PreviewGuard, PreviewImage, PreviewStore};
pub use staged::{HandoffSlot, StagedUpload};
pub use validate::{validate, ValidatedImage, MAX_UPLOAD_BYTES};

/// Errors raised before any network call is made.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("No image file was provided.")]
    MissingFile,
    #[error("Unsupported image format.")]
    UnsupportedFormat,
    #[error("File size exceeds 10 MB. Please choose a smaller file.")]
    TooLarge { size: usize },
    #[error("Staged upload payload is malformed: {0}")]
    MalformedStagedPayload(String),
}
