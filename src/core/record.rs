//! Gallery records and the startup directory scan

use crate::core::error::{GalleryError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A photo or video stored in the gallery directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Base name of the stored file (e.g., "IMG_0001.jpg")
    pub file_name: String,
    /// Full local path of the stored file
    pub path: PathBuf,
}

impl CaptureRecord {
    /// Create a record for a stored file
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
        }
    }

    /// Build a record from a file path, using its base name
    ///
    /// Returns `None` if the path has no final component.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().to_string();
        Some(Self::new(file_name, path))
    }

    /// Whether the stored file is still present on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl std::fmt::Display for CaptureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.file_name, self.path.display())
    }
}

/// List every file directly inside the gallery directory
///
/// Any regular file counts as an entry, whatever its extension. Folders are
/// not entries and are not descended into. Order follows the filesystem's
/// enumeration order.
pub fn scan_gallery(dir: &Path) -> Result<Vec<CaptureRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(GalleryError::GalleryDirectory {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable gallery entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(record) = CaptureRecord::from_path(entry.path()) {
            records.push(record);
        }
    }

    debug!("Found {} files in {}", records.len(), dir.display());
    Ok(records)
}
