//! Error types for the capture gallery
//!
//! Operation-time errors are presented to the user as alerts by the gallery
//! workflow and never propagated past it. Only construction of the workflow
//! returns an error to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the capture gallery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// The device cannot capture or pick media
    #[error("Camera not available")]
    CapabilityUnavailable,

    /// Capture, pick or copy failed; carries the underlying message
    #[error("{0}")]
    OperationFailed(String),

    /// The picker returned a file name with no usable base name
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),

    /// The picked file is the gallery file it would be stored as
    #[error("'{0}' is already in the gallery")]
    AlreadyInGallery(String),

    /// The gallery directory could not be created or listed
    #[error("Gallery directory '{path}' is unavailable: {message}")]
    GalleryDirectory { path: PathBuf, message: String },
}

impl GalleryError {
    /// Build an `OperationFailed` error from anything printable
    pub fn failed(message: impl Into<String>) -> Self {
        GalleryError::OperationFailed(message.into())
    }

    /// Whether this error means the capability is missing rather than a failure
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GalleryError::CapabilityUnavailable)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GalleryError>;

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::OperationFailed(err.to_string())
    }
}
