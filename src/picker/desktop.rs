//! Desktop media picker
//!
//! Desktop machines have no platform camera UI, so capture is delegated to an
//! external command (for example `ffmpeg` reading a V4L2 device) that writes a
//! single file, and library picks go through the native file dialog.
//!
//! Capture command arguments may contain `{output}`, which is replaced by the
//! path the command must write to.

use crate::core::config::PickerConfig;
use crate::core::error::{GalleryError, Result};
use crate::picker::local::LocalFile;
use crate::picker::traits::{
    AcquireMode, MediaFile, MediaKind, MediaPicker, ReadStrategy, SourceReader,
};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tokio::process::Command;

/// Placeholder replaced by the capture output path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Replace every `{output}` placeholder in `args` with `output`
pub fn substitute_output(args: &[String], output: &Path) -> Vec<String> {
    let output = output.to_string_lossy();
    args.iter()
        .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output))
        .collect()
}

// =============================================================================
// File handles
// =============================================================================

/// File chosen through the native file dialog
///
/// On desktop targets a dialog handle is a path, so both read strategies open
/// the file by path and stream it; nothing is buffered whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFile {
    file_name: String,
    path: PathBuf,
    strategy: ReadStrategy,
}

impl DialogFile {
    fn from_handle(handle: rfd::FileHandle, strategy: ReadStrategy) -> Self {
        Self::new(handle.file_name(), handle.path(), strategy)
    }

    /// Create a handle for a file the dialog returned
    pub fn new<P: AsRef<Path>>(
        file_name: impl Into<String>,
        path: P,
        strategy: ReadStrategy,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.as_ref().to_path_buf(),
            strategy: strategy.resolve(),
        }
    }

    /// The resolved read strategy
    pub fn strategy(&self) -> ReadStrategy {
        self.strategy
    }
}

impl MediaFile for DialogFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn full_path(&self) -> &Path {
        &self.path
    }

    async fn open_readable(&self) -> Result<SourceReader> {
        match self.strategy {
            ReadStrategy::LocalPath => LocalFile::new(&self.path).open_readable().await,
            _ => {
                let file = tokio::fs::File::open(&self.path).await.map_err(|e| {
                    GalleryError::failed(format!(
                        "Could not read '{}': {}",
                        self.file_name, e
                    ))
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// File returned by the desktop picker
#[derive(Debug)]
pub enum DesktopFile {
    /// Written by the capture command
    Captured(LocalFile),
    /// Chosen in the file dialog
    Picked(DialogFile),
}

impl MediaFile for DesktopFile {
    fn file_name(&self) -> &str {
        match self {
            DesktopFile::Captured(file) => file.file_name(),
            DesktopFile::Picked(file) => file.file_name(),
        }
    }

    fn full_path(&self) -> &Path {
        match self {
            DesktopFile::Captured(file) => file.full_path(),
            DesktopFile::Picked(file) => file.full_path(),
        }
    }

    async fn open_readable(&self) -> Result<SourceReader> {
        match self {
            DesktopFile::Captured(file) => file.open_readable().await,
            DesktopFile::Picked(file) => file.open_readable().await,
        }
    }

    async fn release(&self) {
        // Captures are staged in the capture directory; picks belong to the user.
        if let DesktopFile::Captured(file) = self {
            if let Err(e) = tokio::fs::remove_file(file.full_path()).await {
                warn!(
                    "Could not remove staged capture {}: {}",
                    file.full_path().display(),
                    e
                );
            }
        }
    }
}

// =============================================================================
// Picker
// =============================================================================

/// Media picker for desktop systems
#[derive(Debug, Clone)]
pub struct DesktopPicker {
    photo_command: Vec<String>,
    video_command: Vec<String>,
    capture_dir: PathBuf,
    read_strategy: ReadStrategy,
}

impl DesktopPicker {
    /// Create a picker with explicit capture commands
    pub fn new(
        photo_command: Vec<String>,
        video_command: Vec<String>,
        capture_dir: PathBuf,
        read_strategy: ReadStrategy,
    ) -> Self {
        Self {
            photo_command,
            video_command,
            capture_dir,
            read_strategy,
        }
    }

    /// Create a picker from the `[picker]` config section
    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(
            config.photo_command.clone(),
            config.video_command.clone(),
            config.capture_dir.clone(),
            config.read_strategy,
        )
    }

    fn command_for(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Photo => &self.photo_command,
            MediaKind::Video => &self.video_command,
        }
    }

    /// Path a capture of `kind` taken at `now` is written to
    pub fn capture_path(&self, kind: MediaKind, now: DateTime<Local>) -> PathBuf {
        self.capture_dir.join(format!(
            "{}_{}.{}",
            kind.capture_prefix(),
            now.format("%Y%m%d_%H%M%S"),
            kind.capture_extension()
        ))
    }

    async fn capture(&self, kind: MediaKind) -> Result<Option<DesktopFile>> {
        let Some((program, args)) = self.command_for(kind).split_first() else {
            return Err(GalleryError::CapabilityUnavailable);
        };

        tokio::fs::create_dir_all(&self.capture_dir)
            .await
            .map_err(|e| {
                GalleryError::failed(format!(
                    "Could not create capture directory '{}': {}",
                    self.capture_dir.display(),
                    e
                ))
            })?;

        let output = self.capture_path(kind, Local::now());
        let args = substitute_output(args, &output);
        debug!("Running capture command: {} {:?}", program, args);

        let status = Command::new(program)
            .args(&args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                GalleryError::failed(format!("Could not start capture command '{}': {}", program, e))
            })?;

        if !status.success() {
            return Err(GalleryError::failed(format!(
                "Capture command '{}' failed with {}",
                program, status
            )));
        }

        if !output.is_file() {
            info!("Capture command produced no {}; treating as cancelled", kind);
            return Ok(None);
        }

        Ok(Some(DesktopFile::Captured(LocalFile::new(output))))
    }

    async fn pick(&self, kind: MediaKind) -> Result<Option<DesktopFile>> {
        let (title, filter) = if kind.is_video() {
            ("Add Video", "Videos")
        } else {
            ("Add Photo", "Photos")
        };

        let handle = AsyncFileDialog::new()
            .set_title(title)
            .add_filter(filter, kind.extensions())
            .pick_file()
            .await;

        match handle {
            Some(handle) => Ok(Some(DesktopFile::Picked(DialogFile::from_handle(
                handle,
                self.read_strategy,
            )))),
            None => {
                debug!("File dialog closed without a selection");
                Ok(None)
            }
        }
    }
}

impl MediaPicker for DesktopPicker {
    type File = DesktopFile;

    fn is_capture_supported(&self) -> bool {
        !self.photo_command.is_empty() || !self.video_command.is_empty()
    }

    fn supports(&self, mode: AcquireMode, kind: MediaKind) -> bool {
        match mode {
            AcquireMode::Capture => !self.command_for(kind).is_empty(),
            AcquireMode::Library => self.is_capture_supported(),
        }
    }

    async fn capture_photo(&self) -> Result<Option<DesktopFile>> {
        self.capture(MediaKind::Photo).await
    }

    async fn capture_video(&self) -> Result<Option<DesktopFile>> {
        self.capture(MediaKind::Video).await
    }

    async fn pick_photo(&self) -> Result<Option<DesktopFile>> {
        self.pick(MediaKind::Photo).await
    }

    async fn pick_video(&self) -> Result<Option<DesktopFile>> {
        self.pick(MediaKind::Video).await
    }
}
