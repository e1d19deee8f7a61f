//! Local file handles and the non-interactive path picker

use crate::core::error::{GalleryError, Result};
use crate::picker::traits::{MediaFile, MediaPicker, SourceReader};
use log::debug;
use std::path::{Path, PathBuf};

/// Handle to a file that already lives on the local filesystem
///
/// The path is the only stream this handle has, so it always reads through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    file_name: String,
    path: PathBuf,
}

impl LocalFile {
    /// Create a handle for `path`, naming it after the path's base name
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { file_name, path }
    }

    /// Create a handle with an explicit display name
    pub fn with_name<P: AsRef<Path>>(path: P, file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MediaFile for LocalFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn full_path(&self) -> &Path {
        &self.path
    }

    async fn open_readable(&self) -> Result<SourceReader> {
        let file = tokio::fs::File::open(&self.path).await.map_err(|e| {
            GalleryError::failed(format!("Could not open '{}': {}", self.path.display(), e))
        })?;
        Ok(Box::new(file))
    }
}

/// Picker that hands back a pre-selected file for every request
///
/// Used when the file is chosen up front (for example on the command line)
/// rather than through a platform UI. Without a file every request behaves as
/// a user cancellation.
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    source: Option<PathBuf>,
}

impl PathPicker {
    /// Create a picker that returns `source`
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        Self {
            source: Some(source.as_ref().to_path_buf()),
        }
    }

    /// Create a picker that always cancels
    pub fn cancelled() -> Self {
        Self { source: None }
    }

    fn staged(&self) -> Result<Option<LocalFile>> {
        let Some(source) = &self.source else {
            debug!("No file staged; treating request as cancelled");
            return Ok(None);
        };

        if !source.is_file() {
            return Err(GalleryError::failed(format!(
                "Could not find file '{}'",
                source.display()
            )));
        }

        Ok(Some(LocalFile::new(source)))
    }
}

impl MediaPicker for PathPicker {
    type File = LocalFile;

    fn is_capture_supported(&self) -> bool {
        true
    }

    async fn capture_photo(&self) -> Result<Option<LocalFile>> {
        self.staged()
    }

    async fn capture_video(&self) -> Result<Option<LocalFile>> {
        self.staged()
    }

    async fn pick_photo(&self) -> Result<Option<LocalFile>> {
        self.staged()
    }

    async fn pick_video(&self) -> Result<Option<LocalFile>> {
        self.staged()
    }
}
