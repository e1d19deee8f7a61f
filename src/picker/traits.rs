//! Media picker abstraction traits for testability
//!
//! This module defines the traits the gallery workflow needs from the platform
//! camera / media library, so real pickers (external capture command, native
//! file dialog, pre-selected file) and mock pickers can be used interchangeably.
//!
//! # Architecture
//!
//! - `MediaPicker` - Captures new media or picks existing media
//! - `MediaFile` - Handle to the file a picker returned
//! - `MediaKind` - Photo or video
//! - `AcquireMode` - Live capture or library pick
//! - `ReadStrategy` - How a handle opens its byte stream on this platform
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use capture_gallery::picker::{MediaFile, MediaKind, MediaPicker, AcquireMode};
//!
//! async fn first_photo<P: MediaPicker>(picker: &P) -> Option<String> {
//!     if !picker.is_capture_supported() {
//!         return None;
//!     }
//!     let file = picker.acquire(AcquireMode::Capture, MediaKind::Photo).await.ok()??;
//!     Some(file.file_name().to_string())
//! }
//! ```

use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::Path;
use tokio::io::AsyncRead;

/// Readable byte stream produced by a file handle
pub type SourceReader = Box<dyn AsyncRead + Unpin + Send>;

/// Photo or video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Check if this is a video
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }

    /// File extensions offered when picking this kind from the library
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => &[
                "jpg", "jpeg", "png", "heic", "heif", "gif", "webp", "bmp", "tiff", "tif", "dng",
            ],
            MediaKind::Video => &["mp4", "m4v", "mov", "avi", "mkv", "webm", "3gp"],
        }
    }

    /// Extension used for newly captured files
    pub fn capture_extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    /// File name prefix used for newly captured files
    pub fn capture_prefix(&self) -> &'static str {
        match self {
            MediaKind::Photo => "IMG",
            MediaKind::Video => "VID",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Where the media comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquireMode {
    /// Live capture through the camera
    Capture,
    /// Selection of an existing file from the library
    Library,
}

impl Display for AcquireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireMode::Capture => write!(f, "capture"),
            AcquireMode::Library => write!(f, "library"),
        }
    }
}

/// How a file handle opens its source bytes
///
/// Some platforms cannot open the picker handle's own stream and must read the
/// file through its local path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    /// Pick the platform default at build time
    #[default]
    Auto,
    /// Read through the handle's own stream
    Stream,
    /// Read the file directly from its full path
    LocalPath,
}

impl ReadStrategy {
    /// Resolve `Auto` to the concrete strategy for the target platform
    pub fn resolve(self) -> ReadStrategy {
        match self {
            ReadStrategy::Auto => {
                if cfg!(target_os = "windows") {
                    ReadStrategy::LocalPath
                } else {
                    ReadStrategy::Stream
                }
            }
            other => other,
        }
    }
}

/// Handle to a file returned by a picker
#[allow(async_fn_in_trait)]
pub trait MediaFile {
    /// File name as reported by the picker
    fn file_name(&self) -> &str;

    /// Full path of the file on the local filesystem
    fn full_path(&self) -> &Path;

    /// Open the file's bytes for reading
    async fn open_readable(&self) -> Result<SourceReader>;

    /// Called once the bytes are stored in the gallery
    ///
    /// Handles that own a staging copy remove it here. Handles over files the
    /// user owns leave them alone, which is the default.
    async fn release(&self) {}
}

/// Trait for the platform camera / media library
///
/// Every acquire operation suspends until the user finishes with the platform
/// UI and returns `Ok(None)` when the user cancels.
#[allow(async_fn_in_trait)]
pub trait MediaPicker {
    /// The type of file handle returned by this picker
    type File: MediaFile;

    /// Whether capture (and therefore any acquire operation) is available
    fn is_capture_supported(&self) -> bool;

    /// Whether the operation for `mode` and `kind` can run
    ///
    /// Defaults to `is_capture_supported`; pickers that can capture only some
    /// kinds narrow it.
    fn supports(&self, _mode: AcquireMode, _kind: MediaKind) -> bool {
        self.is_capture_supported()
    }

    /// Capture a new photo
    async fn capture_photo(&self) -> Result<Option<Self::File>>;

    /// Capture a new video
    async fn capture_video(&self) -> Result<Option<Self::File>>;

    /// Pick an existing photo from the library
    async fn pick_photo(&self) -> Result<Option<Self::File>>;

    /// Pick an existing video from the library
    async fn pick_video(&self) -> Result<Option<Self::File>>;

    /// Dispatch to the operation matching `mode` and `kind`
    async fn acquire(&self, mode: AcquireMode, kind: MediaKind) -> Result<Option<Self::File>> {
        match (mode, kind) {
            (AcquireMode::Capture, MediaKind::Photo) => self.capture_photo().await,
            (AcquireMode::Capture, MediaKind::Video) => self.capture_video().await,
            (AcquireMode::Library, MediaKind::Photo) => self.pick_photo().await,
            (AcquireMode::Library, MediaKind::Video) => self.pick_video().await,
        }
    }
}
